use crate::error::{IntakeError, Result};
use crate::widget::policy::CharClass;

use super::{GroupShape, PartSpec, PartStyle};

/// A date split into numeric parts by a divider, e.g. `MM/DD/YYYY`.
///
/// Each part of the format becomes a numeric segment whose placeholder is
/// the part text and whose maximum length is the part's length. The mirrored
/// value is the assembled, divider-joined date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateShape {
    format: String,
    divider: String,
    parts: Vec<String>,
}

impl DateShape {
    /// Create a date shape.
    ///
    /// Fails with [`IntakeError::InvalidDateFormat`] when the divider is
    /// empty or the format yields an empty part.
    pub fn new(format: impl Into<String>, divider: impl Into<String>) -> Result<Self> {
        let format = format.into();
        let divider = divider.into();
        let invalid = || IntakeError::InvalidDateFormat {
            format: format.clone(),
            divider: divider.clone(),
        };

        if divider.is_empty() {
            return Err(invalid());
        }
        let parts: Vec<String> = format.split(divider.as_str()).map(String::from).collect();
        if parts.iter().any(String::is_empty) {
            return Err(invalid());
        }

        Ok(Self {
            format,
            divider,
            parts,
        })
    }

    /// The format template.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// The divider text.
    pub fn divider(&self) -> &str {
        &self.divider
    }

    /// The format parts, used as segment placeholders.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl GroupShape for DateShape {
    fn name(&self) -> &str {
        "date"
    }

    fn layout(&self) -> Vec<PartSpec> {
        let mut layout = Vec::with_capacity(self.parts.len() * 2);
        for (index, part) in self.parts.iter().enumerate() {
            if index > 0 {
                layout.push(PartSpec::divider(self.divider.as_str()));
            }
            layout.push(PartSpec::segment(
                part.chars().count(),
                CharClass::Numeric,
                part.as_str(),
            ));
        }
        layout
    }

    fn populate(&self, raw: &str) -> Vec<Option<String>> {
        let mut values = raw.split(self.divider.as_str());
        self.parts
            .iter()
            .map(|_| values.next().map(String::from))
            .collect()
    }

    fn mirrors_assembled(&self) -> bool {
        true
    }

    fn part_style(&self) -> PartStyle {
        PartStyle {
            first_margin_left: Some("2px"),
            every_part: vec![("text-align", "left"), ("padding-left", "4px")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntakeMetrics;
    use crate::host::{Document, MemoryDocument};
    use crate::widget::group::GroupPlan;

    #[test]
    fn test_layout_interleaves_dividers() {
        let shape = DateShape::new("MM/DD/YYYY", "/").unwrap();
        assert_eq!(
            shape.layout(),
            vec![
                PartSpec::segment(2, CharClass::Numeric, "MM"),
                PartSpec::divider("/"),
                PartSpec::segment(2, CharClass::Numeric, "DD"),
                PartSpec::divider("/"),
                PartSpec::segment(4, CharClass::Numeric, "YYYY"),
            ]
        );
    }

    #[test]
    fn test_invalid_formats() {
        assert!(matches!(
            DateShape::new("MM/DD/YYYY", ""),
            Err(IntakeError::InvalidDateFormat { .. })
        ));
        assert!(matches!(
            DateShape::new("MM//YYYY", "/"),
            Err(IntakeError::InvalidDateFormat { .. })
        ));
        assert!(matches!(
            DateShape::new("", "-"),
            Err(IntakeError::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_populate_pads_missing_parts() {
        let shape = DateShape::new("MM/DD/YYYY", "/").unwrap();
        assert_eq!(
            shape.populate("01/02"),
            vec![Some("01".into()), Some("02".into()), None]
        );
        assert_eq!(shape.populate("01/02/2023/9").len(), 3);
    }

    #[test]
    fn test_mounted_date_group() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let shape = DateShape::new("MM/DD/YYYY", "/").unwrap();
        let group = GroupPlan::new(Box::new(shape), "01/02/2023")
            .unwrap()
            .mount(&mut doc, root, IntakeMetrics::default());

        assert_eq!(group.values(), vec!["01", "02", "2023"]);
        assert_eq!(group.assemble(), "01/02/2023");
        assert_eq!(group.mirrored_value(), "01/02/2023");

        let first = group.parts()[0].element();
        assert_eq!(doc.style(first, "margin-left").as_deref(), Some("2px"));
        assert_eq!(doc.style(first, "padding-left").as_deref(), Some("4px"));
        let divider = group.parts()[1].element();
        assert_eq!(doc.style(divider, "text-align").as_deref(), Some("left"));
    }
}
