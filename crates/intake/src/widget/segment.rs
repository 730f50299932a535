//! A single editable segment of a field group.

use crate::config::IntakeMetrics;
use crate::host::{Document, ElementId};

use super::policy::{CharClass, SegmentValidator, ValidationState, Validator};
use super::state_machine::SegmentContext;

/// Class name shared by every part element.
pub(crate) const PART_CLASS: &str = "Intake-Part";

/// Describes a segment before it is created in the host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSpec {
    /// Maximum number of characters.
    pub max_length: usize,
    /// Which characters the segment admits.
    pub class: CharClass,
    /// Text shown while the segment is empty.
    pub placeholder: String,
}

impl SegmentSpec {
    /// Create a segment description.
    pub fn new(max_length: usize, class: CharClass, placeholder: impl Into<String>) -> Self {
        Self {
            max_length,
            class,
            placeholder: placeholder.into(),
        }
    }
}

/// One bounded, focusable text-entry unit holding one part of the value.
///
/// The segment caches the content of its host element. The cache is
/// refreshed from the host after every keystroke, and the content always
/// satisfies the segment's character class and maximum length.
///
/// Neighbour links are indices into the owning group's part sequence.
#[derive(Debug, Clone)]
pub struct Segment {
    element: ElementId,
    validator: SegmentValidator,
    placeholder: String,
    content: String,
    just_gained_focus: bool,
    previous: Option<usize>,
    next: Option<usize>,
}

impl Segment {
    /// Create the host element for a segment.
    pub(crate) fn create<D: Document + ?Sized>(
        doc: &mut D,
        spec: &SegmentSpec,
        metrics: &IntakeMetrics,
    ) -> Self {
        let element = doc.create_element("input");
        doc.set_class_name(element, PART_CLASS);
        doc.set_attribute(element, "placeholder", &spec.placeholder);
        spec.class.apply_input_attributes(doc, element);

        let segment = Self {
            element,
            validator: SegmentValidator::new(spec.class, spec.max_length),
            placeholder: spec.placeholder.clone(),
            content: String::new(),
            just_gained_focus: false,
            previous: None,
            next: None,
        };
        segment.refresh_width(doc, metrics);
        segment
    }

    /// The host element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Maximum number of characters.
    pub fn max_length(&self) -> usize {
        self.validator.max_length()
    }

    /// Which characters the segment admits.
    pub fn char_class(&self) -> CharClass {
        self.validator.char_class()
    }

    /// Text shown while empty.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content length in characters.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether the segment holds no text.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether the segment is filled to its maximum length.
    pub fn is_complete(&self) -> bool {
        self.validation_state() == ValidationState::Acceptable
    }

    /// Validation state of the current content.
    pub fn validation_state(&self) -> ValidationState {
        self.validator.validate(&self.content)
    }

    /// Index of the previous segment in the group's part sequence.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Index of the next segment in the group's part sequence.
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Whether focus arrived since the last keystroke that could complete
    /// the segment.
    pub fn has_just_gained_focus(&self) -> bool {
        self.just_gained_focus
    }

    pub(crate) fn set_links(&mut self, previous: Option<usize>, next: Option<usize>) {
        self.previous = previous;
        self.next = next;
    }

    pub(crate) fn mark_focus_gained(&mut self) {
        self.just_gained_focus = true;
    }

    pub(crate) fn clear_focus_flag(&mut self) {
        self.just_gained_focus = false;
    }

    /// State-machine view of the segment, read live from the host.
    pub(crate) fn context<D: Document + ?Sized>(&self, doc: &D) -> SegmentContext {
        let len = doc.value(self.element).chars().count();
        SegmentContext {
            class: self.char_class(),
            len,
            max_length: self.max_length(),
            selection: doc.selection(self.element).clamped(len),
            has_previous: self.previous.is_some(),
            has_next: self.next.is_some(),
            just_gained_focus: self.just_gained_focus,
        }
    }

    /// Replace the content, cleaning it up to fit the segment first.
    pub(crate) fn set_content<D: Document + ?Sized>(&mut self, doc: &mut D, text: &str) {
        let cleaned = self.validator.fixup(text).unwrap_or_default();
        doc.set_value(self.element, &cleaned);
        self.content = cleaned;
    }

    /// Pull the host value into the cache, trimming it to the maximum length
    /// and dropping characters the class rejects.
    ///
    /// The host value is rewritten only when cleanup changed it, so an
    /// untouched selection survives. Returns whether the content changed.
    pub(crate) fn sync<D: Document + ?Sized>(&mut self, doc: &mut D) -> bool {
        let raw = doc.value(self.element);
        let cleaned = self.char_class().sanitize(&raw, self.max_length());
        if cleaned != raw {
            doc.set_value(self.element, &cleaned);
        }
        let changed = cleaned != self.content;
        self.content = cleaned;
        changed
    }

    /// Empty the segment and shrink it back to placeholder width.
    pub(crate) fn clear<D: Document + ?Sized>(&mut self, doc: &mut D, metrics: &IntakeMetrics) {
        self.set_content(doc, "");
        self.refresh_width(doc, metrics);
    }

    /// Display width in pixels.
    ///
    /// An empty segment reserves one character more than its maximum length.
    pub fn width(&self, metrics: &IntakeMetrics) -> f64 {
        let chars = if self.is_empty() {
            self.max_length() + 1
        } else {
            self.len()
        };
        chars as f64 * metrics.segment_char_width
    }

    pub(crate) fn refresh_width<D: Document + ?Sized>(&self, doc: &mut D, metrics: &IntakeMetrics) {
        doc.set_style(self.element, "width", &pixels(self.width(metrics)));
    }
}

/// Format a pixel length as a CSS value.
pub(crate) fn pixels(value: f64) -> String {
    format!("{}px", (value * 100.0).round() / 100.0)
}
