//! Host document capability interface.
//!
//! Intake never talks to a concrete document tree. Everything it needs from
//! the environment (creating elements, mutating attributes and styles,
//! moving focus, reading the selection of a text-entry element, dispatching
//! change notifications) goes through the [`Document`] trait. The host feeds
//! input back to the widget as [`WidgetEvent`](crate::widget::WidgetEvent)s.
//!
//! [`MemoryDocument`] is a complete in-memory implementation, used for
//! headless hosts and throughout the test-suite.
//!
//! # Focus
//!
//! [`Document::focus`] only moves focus. It must not deliver focus events
//! back to the widget: when a segment moves focus during key handling, the
//! widget runs the focus-out/focus-in transition itself, synchronously,
//! before the key release of the same keystroke is handled.

mod memory;

pub use memory::MemoryDocument;

use slotmap::new_key_type;

new_key_type! {
    /// Identifies one element of the host document.
    pub struct ElementId;
}

/// A reference to a host element: either a direct handle or a selector
/// resolved against the document when the widget is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRef {
    /// A direct element handle.
    Handle(ElementId),
    /// A lookup selector (`#id`, `.class` or a tag name).
    Selector(String),
}

impl ElementRef {
    /// Resolve this reference against a document.
    ///
    /// Returns `None` when a selector matches nothing.
    pub fn resolve<D: Document + ?Sized>(&self, doc: &D) -> Option<ElementId> {
        match self {
            ElementRef::Handle(id) => Some(*id),
            ElementRef::Selector(selector) => doc.query_selector(selector),
        }
    }
}

impl From<ElementId> for ElementRef {
    fn from(id: ElementId) -> Self {
        ElementRef::Handle(id)
    }
}

impl From<&str> for ElementRef {
    fn from(selector: &str) -> Self {
        ElementRef::Selector(selector.to_string())
    }
}

impl From<String> for ElementRef {
    fn from(selector: String) -> Self {
        ElementRef::Selector(selector)
    }
}

/// The selection of a text-entry element, in character offsets.
///
/// A collapsed selection (`start == end`) is the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SelectionRange {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive). This is where the caret sits.
    pub end: usize,
}

impl SelectionRange {
    /// Create a selection, normalizing the order of the endpoints.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// A collapsed selection (caret) at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// Whether nothing is selected.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Whether the selection spans all `len` characters of a value.
    ///
    /// An empty value counts as fully covered.
    pub fn covers_all(&self, len: usize) -> bool {
        self.start == 0 && self.end >= len
    }

    /// Clamp both endpoints to a value of `len` characters.
    pub fn clamped(&self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// The capabilities Intake requires from its host document.
pub trait Document {
    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Detach `child` from `parent`.
    fn remove_child(&mut self, parent: ElementId, child: ElementId);

    /// The children of `parent`, in document order.
    fn children(&self, parent: ElementId) -> Vec<ElementId>;

    /// The parent of `element`, if attached.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Find the first element matching a selector.
    fn query_selector(&self, selector: &str) -> Option<ElementId>;

    /// Set an attribute.
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    /// Read an attribute.
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Replace the class list.
    fn set_class_name(&mut self, element: ElementId, class_name: &str);

    /// The class list as a space-separated string.
    fn class_name(&self, element: ElementId) -> String;

    /// Add one class, keeping existing ones.
    fn add_class(&mut self, element: ElementId, class: &str) {
        let current = self.class_name(element);
        if current.split_whitespace().any(|c| c == class) {
            return;
        }
        let updated = if current.is_empty() {
            class.to_string()
        } else {
            format!("{current} {class}")
        };
        self.set_class_name(element, &updated);
    }

    /// Set an inline style property.
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Read an inline style property.
    fn style(&self, element: ElementId, property: &str) -> Option<String>;

    /// Set the text content of a non-editable element.
    fn set_text(&mut self, element: ElementId, text: &str);

    /// The text content of a non-editable element.
    fn text(&self, element: ElementId) -> String;

    /// The current value of a text-entry element.
    fn value(&self, element: ElementId) -> String;

    /// Replace the value of a text-entry element.
    fn set_value(&mut self, element: ElementId, value: &str);

    /// Move keyboard focus to `element`.
    fn focus(&mut self, element: ElementId);

    /// The element holding keyboard focus.
    fn focused(&self) -> Option<ElementId>;

    /// The selection of a text-entry element.
    fn selection(&self, element: ElementId) -> SelectionRange;

    /// Replace the selection of a text-entry element.
    fn set_selection(&mut self, element: ElementId, selection: SelectionRange);

    /// Dispatch a change notification on `element`.
    fn dispatch_change(&mut self, element: ElementId);
}
