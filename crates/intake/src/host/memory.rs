//! In-memory host document.

use std::collections::BTreeMap;

use intake_core::logging::targets;
use slotmap::{SecondaryMap, SlotMap};
use unicode_segmentation::UnicodeSegmentation;

use super::{Document, ElementId, SelectionRange};
use crate::widget::{Key, KeyPressEvent};

/// One element of a [`MemoryDocument`].
#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    class_name: String,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    selection: SelectionRange,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// A complete in-memory [`Document`].
///
/// Besides the capability interface it models the parts of a browser that
/// Intake relies on but does not implement itself: the *default action* of a
/// key press that was not suppressed (see [`apply_key_default`]) and a count
/// of change notifications per element.
///
/// [`apply_key_default`]: MemoryDocument::apply_key_default
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: SlotMap<ElementId, Node>,
    root: ElementId,
    focused: Option<ElementId>,
    changes: SecondaryMap<ElementId, usize>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document with an empty `body` root element.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            tag: "body".into(),
            ..Node::default()
        });
        Self {
            nodes,
            root,
            focused: None,
            changes: SecondaryMap::new(),
        }
    }

    /// The root (`body`) element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// The tag name of an element.
    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element).map(|n| n.tag.as_str())
    }

    /// Create an element with an `id` attribute and attach it to the root.
    pub fn create_with_id(&mut self, tag: &str, id: &str) -> ElementId {
        let element = self.create_element(tag);
        self.set_attribute(element, "id", id);
        self.append_child(self.root, element);
        element
    }

    /// How many change notifications were dispatched on `element`.
    pub fn change_count(&self, element: ElementId) -> usize {
        self.changes.get(element).copied().unwrap_or(0)
    }

    /// Remove keyboard focus from every element.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Whether `element` is the root or a descendant of it.
    pub fn is_attached(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Apply the default action of a key press that the widget did not
    /// suppress, the way a browser text-entry element would.
    ///
    /// - Printable text replaces the selection (respecting a `maxlength`
    ///   attribute) and leaves the caret after it.
    /// - Backspace/Delete remove the selection, or one grapheme before/after
    ///   the caret.
    /// - Left/Right collapse the selection or move the caret by one grapheme;
    ///   Home/End jump to the ends.
    /// - Everything else (Tab, Up/Down, Enter, Escape, composition) does
    ///   nothing to the value.
    pub fn apply_key_default(&mut self, element: ElementId, event: &KeyPressEvent) {
        let Some(node) = self.nodes.get(element) else {
            return;
        };
        let value = node.value.clone();
        let len = value.chars().count();
        let selection = node.selection.clamped(len);
        let max_length = node
            .attributes
            .get("maxlength")
            .and_then(|m| m.parse::<usize>().ok());

        let (new_value, caret) = match event.key {
            Key::Backspace => {
                if !selection.is_collapsed() {
                    (splice(&value, selection, ""), selection.start)
                } else if selection.end == 0 {
                    (value.clone(), 0)
                } else {
                    let start = prev_boundary(&value, selection.end);
                    (splice(&value, SelectionRange::new(start, selection.end), ""), start)
                }
            }
            Key::Delete => {
                if !selection.is_collapsed() {
                    (splice(&value, selection, ""), selection.start)
                } else {
                    let end = next_boundary(&value, selection.end);
                    (splice(&value, SelectionRange::new(selection.end, end), ""), selection.end)
                }
            }
            Key::ArrowLeft => {
                let caret = if selection.is_collapsed() {
                    prev_boundary(&value, selection.end)
                } else {
                    selection.start
                };
                (value.clone(), caret)
            }
            Key::ArrowRight => {
                let caret = if selection.is_collapsed() {
                    next_boundary(&value, selection.end)
                } else {
                    selection.end
                };
                (value.clone(), caret)
            }
            Key::Home => (value.clone(), 0),
            Key::End => (value.clone(), len),
            _ => {
                let typing = !event.text.is_empty()
                    && !event.modifiers.control
                    && !event.modifiers.meta
                    && !event.text.chars().any(char::is_control);
                if !typing {
                    return;
                }
                let mut text: String = event.text.clone();
                if let Some(max) = max_length {
                    let room = max.saturating_sub(len - selection.len());
                    text = text.chars().take(room).collect();
                }
                let caret = selection.start + text.chars().count();
                (splice(&value, selection, &text), caret)
            }
        };

        tracing::trace!(
            target: targets::HOST,
            key = ?event.key,
            before = %value,
            after = %new_value,
            caret,
            "applied default key action"
        );

        if let Some(node) = self.nodes.get_mut(element) {
            node.value = new_value;
            node.selection = SelectionRange::caret(caret);
        }
    }

    /// Find the first descendant of `from` (inclusive) matching `selector`.
    fn find(&self, from: ElementId, selector: &str) -> Option<ElementId> {
        let node = self.nodes.get(from)?;
        if matches_selector(node, selector) {
            return Some(from);
        }
        node.children
            .iter()
            .find_map(|child| self.find(*child, selector))
    }
}

fn matches_selector(node: &Node, selector: &str) -> bool {
    if let Some(id) = selector.strip_prefix('#') {
        node.attributes.get("id").is_some_and(|v| v == id)
    } else if let Some(class) = selector.strip_prefix('.') {
        node.class_name.split_whitespace().any(|c| c == class)
    } else {
        node.tag.eq_ignore_ascii_case(selector)
    }
}

/// Replace the characters covered by `range` with `text`.
fn splice(value: &str, range: SelectionRange, text: &str) -> String {
    let mut out: String = value.chars().take(range.start).collect();
    out.push_str(text);
    out.extend(value.chars().skip(range.end));
    out
}

/// Grapheme cluster boundaries of `value`, in character offsets.
fn boundaries(value: &str) -> Vec<usize> {
    let mut result = vec![0];
    let mut chars = 0;
    for grapheme in value.graphemes(true) {
        chars += grapheme.chars().count();
        result.push(chars);
    }
    result
}

fn prev_boundary(value: &str, pos: usize) -> usize {
    boundaries(value)
        .into_iter()
        .rev()
        .find(|b| *b < pos)
        .unwrap_or(0)
}

fn next_boundary(value: &str, pos: usize) -> usize {
    let bounds = boundaries(value);
    let len = bounds.last().copied().unwrap_or(0);
    bounds.into_iter().find(|b| *b > pos).unwrap_or(len)
}

impl Document for MemoryDocument {
    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.insert(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        })
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        if let Some(old_parent) = self.nodes[child].parent {
            self.remove_child(old_parent, child);
        }
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
    }

    fn remove_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            if node.parent == Some(parent) {
                node.parent = None;
            }
        }
        if self.focused.is_some_and(|f| !self.is_attached(f)) {
            self.focused = None;
        }
    }

    fn children(&self, parent: ElementId) -> Vec<ElementId> {
        self.nodes
            .get(parent)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(element).and_then(|n| n.parent)
    }

    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }
        self.find(self.root, selector)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.nodes
            .get(element)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_class_name(&mut self, element: ElementId, class_name: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.class_name = class_name.to_string();
        }
    }

    fn class_name(&self, element: ElementId) -> String {
        self.nodes
            .get(element)
            .map(|n| n.class_name.clone())
            .unwrap_or_default()
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.nodes
            .get(element)
            .and_then(|n| n.styles.get(property).cloned())
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.text = text.to_string();
        }
    }

    fn text(&self, element: ElementId) -> String {
        self.nodes
            .get(element)
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    fn value(&self, element: ElementId) -> String {
        self.nodes
            .get(element)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, element: ElementId, value: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.value = value.to_string();
            node.selection = SelectionRange::caret(value.chars().count());
        }
    }

    fn focus(&mut self, element: ElementId) {
        if self.nodes.contains_key(element) {
            self.focused = Some(element);
        }
    }

    fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    fn selection(&self, element: ElementId) -> SelectionRange {
        self.nodes
            .get(element)
            .map(|n| n.selection.clamped(n.value.chars().count()))
            .unwrap_or_default()
    }

    fn set_selection(&mut self, element: ElementId, selection: SelectionRange) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.selection = selection.clamped(node.value.chars().count());
        }
    }

    fn dispatch_change(&mut self, element: ElementId) {
        if let Some(count) = self.changes.get_mut(element) {
            *count += 1;
        } else {
            self.changes.insert(element, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::KeyboardModifiers;

    fn press(key: Key, text: &str) -> KeyPressEvent {
        KeyPressEvent::new(ElementId::default(), key, KeyboardModifiers::NONE, text, false)
    }

    fn input_with(doc: &mut MemoryDocument, value: &str) -> ElementId {
        let input = doc.create_element("input");
        doc.append_child(doc.root(), input);
        doc.set_value(input, value);
        input
    }

    #[test]
    fn test_query_selector_forms() {
        let mut doc = MemoryDocument::new();
        let form = doc.create_with_id("form", "signup");
        let input = doc.create_element("input");
        doc.set_class_name(input, "hidden-date other");
        doc.append_child(form, input);

        assert_eq!(doc.query_selector("#signup"), Some(form));
        assert_eq!(doc.query_selector(".hidden-date"), Some(input));
        assert_eq!(doc.query_selector("INPUT"), Some(input));
        assert_eq!(doc.query_selector("select"), None);
        assert_eq!(doc.query_selector(""), None);
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut doc = MemoryDocument::new();
        let input = input_with(&mut doc, "123");
        doc.set_selection(input, SelectionRange::new(0, 3));

        doc.apply_key_default(input, &press(Key::Digit9, "9"));
        assert_eq!(doc.value(input), "9");
        assert_eq!(doc.selection(input), SelectionRange::caret(1));
    }

    #[test]
    fn test_typing_respects_maxlength() {
        let mut doc = MemoryDocument::new();
        let input = input_with(&mut doc, "ab");
        doc.set_attribute(input, "maxlength", "2");

        doc.apply_key_default(input, &press(Key::C, "c"));
        assert_eq!(doc.value(input), "ab");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut doc = MemoryDocument::new();
        let input = input_with(&mut doc, "1234");
        doc.set_selection(input, SelectionRange::caret(2));

        doc.apply_key_default(input, &press(Key::Backspace, ""));
        assert_eq!(doc.value(input), "134");
        assert_eq!(doc.selection(input), SelectionRange::caret(1));

        doc.apply_key_default(input, &press(Key::Delete, ""));
        assert_eq!(doc.value(input), "14");

        doc.set_selection(input, SelectionRange::caret(0));
        doc.apply_key_default(input, &press(Key::Backspace, ""));
        assert_eq!(doc.value(input), "14");
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut doc = MemoryDocument::new();
        let input = input_with(&mut doc, "ae\u{301}");
        doc.apply_key_default(input, &press(Key::Backspace, ""));
        assert_eq!(doc.value(input), "a");
    }

    #[test]
    fn test_caret_movement() {
        let mut doc = MemoryDocument::new();
        let input = input_with(&mut doc, "K1A");

        doc.apply_key_default(input, &press(Key::ArrowLeft, ""));
        assert_eq!(doc.selection(input), SelectionRange::caret(2));
        doc.apply_key_default(input, &press(Key::Home, ""));
        assert_eq!(doc.selection(input), SelectionRange::caret(0));
        doc.apply_key_default(input, &press(Key::ArrowRight, ""));
        assert_eq!(doc.selection(input), SelectionRange::caret(1));
        doc.apply_key_default(input, &press(Key::End, ""));
        assert_eq!(doc.selection(input), SelectionRange::caret(3));
    }

    #[test]
    fn test_remove_child_drops_focus() {
        let mut doc = MemoryDocument::new();
        let input = input_with(&mut doc, "");
        doc.focus(input);
        assert_eq!(doc.focused(), Some(input));

        doc.remove_child(doc.root(), input);
        assert_eq!(doc.focused(), None);
        assert!(!doc.is_attached(input));
    }

    #[test]
    fn test_change_count() {
        let mut doc = MemoryDocument::new();
        let hidden = doc.create_with_id("input", "hidden");
        assert_eq!(doc.change_count(hidden), 0);
        doc.dispatch_change(hidden);
        doc.dispatch_change(hidden);
        assert_eq!(doc.change_count(hidden), 2);
    }
}
