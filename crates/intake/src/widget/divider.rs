//! Static divider glyphs between segments.

use crate::config::IntakeMetrics;
use crate::host::{Document, ElementId};

use super::segment::{PART_CLASS, pixels};

/// A non-interactive label between two segments.
#[derive(Debug, Clone)]
pub struct Divider {
    element: ElementId,
    text: String,
}

impl Divider {
    pub(crate) fn create<D: Document + ?Sized>(
        doc: &mut D,
        text: &str,
        metrics: &IntakeMetrics,
    ) -> Self {
        let element = doc.create_element("p");
        doc.set_class_name(element, PART_CLASS);
        doc.set_text(element, text);

        let divider = Self {
            element,
            text: text.to_string(),
        };
        doc.set_style(element, "width", &pixels(divider.width(metrics)));
        divider
    }

    /// The host element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Display width in pixels.
    pub fn width(&self, metrics: &IntakeMetrics) -> f64 {
        self.text.chars().count() as f64 * metrics.divider_char_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryDocument;

    #[test]
    fn test_divider_element() {
        let mut doc = MemoryDocument::new();
        let divider = Divider::create(&mut doc, "/", &IntakeMetrics::default());

        assert_eq!(doc.tag(divider.element()), Some("p"));
        assert_eq!(doc.text(divider.element()), "/");
        assert_eq!(doc.class_name(divider.element()), "Intake-Part");
        assert_eq!(doc.style(divider.element(), "width").as_deref(), Some("7.2px"));
    }
}
