//! Shared helpers for driving a widget through an in-memory host.

#![allow(dead_code)]

use intake::prelude::*;

/// Outcome of one keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub down_suppressed: bool,
    pub up_suppressed: bool,
}

/// A widget mounted in a [`MemoryDocument`], with a host loop that delivers
/// events the way a browser would.
///
/// A keystroke is delivered as key-down, then the host default action (if
/// not suppressed) on the key-down target, then key-up on that same target.
pub struct Session {
    pub doc: MemoryDocument,
    pub intake: Intake,
    pub hidden: ElementId,
    pub form: ElementId,
}

impl Session {
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("intake=trace")
            .with_test_writer()
            .try_init();
    }

    /// Build a widget in `#widget` with sink `#hidden` and form `#form`.
    pub fn build(options: impl Into<IntakeOptions>, existing: &str) -> Self {
        Self::build_with(options, existing, |b| b)
    }

    pub fn build_with(
        options: impl Into<IntakeOptions>,
        existing: &str,
        configure: impl FnOnce(IntakeBuilder) -> IntakeBuilder,
    ) -> Self {
        Self::init_tracing();
        let mut doc = MemoryDocument::new();
        let form = doc.create_with_id("form", "form");
        let container = doc.create_element("div");
        doc.set_attribute(container, "id", "widget");
        doc.append_child(form, container);
        let hidden = doc.create_element("input");
        doc.set_attribute(hidden, "id", "hidden");
        doc.append_child(form, hidden);

        let builder = Intake::builder("#widget")
            .form("#form")
            .hidden_sink("#hidden")
            .existing_value(existing)
            .options(options);
        let intake = configure(builder).build(&mut doc).expect("widget builds");

        Self {
            doc,
            intake,
            hidden,
            form,
        }
    }

    pub fn date(existing: &str) -> Self {
        Self::build(DateOptions::new("MM/DD/YYYY", "/"), existing)
    }

    pub fn phone(existing: &str) -> Self {
        Self::build(PhoneOptions::new("(XXX)XXX-XXXX"), existing)
    }

    pub fn postal(country: &str, existing: &str) -> Self {
        Self::build(PostalCodeOptions::country(country), existing)
    }

    /// Element of the `n`th segment.
    pub fn segment(&self, n: usize) -> ElementId {
        self.intake
            .group()
            .segments()
            .nth(n)
            .map(|s| s.element())
            .expect("segment exists")
    }

    /// Position (in segment order) of the focused segment.
    pub fn focused_segment(&self) -> Option<usize> {
        let focused = self.doc.focused()?;
        self.intake
            .group()
            .segments()
            .position(|s| s.element() == focused)
    }

    /// Segment contents.
    pub fn values(&self) -> Vec<String> {
        self.intake
            .group()
            .values()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Value of the hidden sink.
    pub fn hidden_value(&self) -> String {
        self.doc.value(self.hidden)
    }

    pub fn dispatch(&mut self, mut event: WidgetEvent) -> WidgetEvent {
        self.intake.handle_event(&mut self.doc, &mut event);
        event
    }

    /// Move host focus to `element`, delivering focus-out and focus-in.
    pub fn focus(&mut self, element: ElementId) {
        let previous = self.doc.focused();
        if previous == Some(element) {
            return;
        }
        if let Some(previous) = previous {
            self.dispatch(WidgetEvent::FocusOut(FocusOutEvent::new(
                previous,
                FocusReason::Mouse,
            )));
        }
        self.doc.focus(element);
        self.dispatch(WidgetEvent::FocusIn(FocusInEvent::new(
            element,
            FocusReason::Mouse,
        )));
    }

    /// Move host focus out of the widget entirely.
    pub fn blur(&mut self) {
        if let Some(previous) = self.doc.focused() {
            self.dispatch(WidgetEvent::FocusOut(FocusOutEvent::new(
                previous,
                FocusReason::Other,
            )));
        }
        self.doc.blur();
    }

    /// Click an element. Inputs take focus; anything else focuses the
    /// container.
    pub fn click(&mut self, element: ElementId) {
        let focus_target = if self.doc.tag(element) == Some("input") {
            element
        } else {
            self.intake.container()
        };
        self.focus(focus_target);
        self.dispatch(WidgetEvent::Click(ClickEvent::new(element)));
    }

    /// Click the `n`th segment.
    pub fn click_segment(&mut self, n: usize) {
        let element = self.segment(n);
        self.click(element);
    }

    /// Press and release a key on the focused element.
    pub fn press(&mut self, key: Key) -> Keystroke {
        self.press_with(key, KeyboardModifiers::NONE, None)
    }

    pub fn press_with(
        &mut self,
        key: Key,
        modifiers: KeyboardModifiers,
        text: Option<&str>,
    ) -> Keystroke {
        let target = self.doc.focused().expect("an element has focus");
        let text = text
            .map(String::from)
            .or_else(|| key.text(modifiers))
            .unwrap_or_default();

        let down = KeyPressEvent::new(target, key, modifiers, text, false);
        let down = match self.dispatch(WidgetEvent::KeyPress(down)) {
            WidgetEvent::KeyPress(e) => e,
            _ => unreachable!(),
        };
        if !down.base.is_default_suppressed() {
            self.doc.apply_key_default(target, &down);
        }

        let up = self.dispatch(WidgetEvent::KeyRelease(KeyReleaseEvent::new(
            target, key, modifiers,
        )));
        Keystroke {
            down_suppressed: down.base.is_default_suppressed(),
            up_suppressed: up.is_default_suppressed(),
        }
    }

    /// Type a string, one keystroke per character.
    pub fn type_text(&mut self, text: &str) -> Vec<Keystroke> {
        text.chars()
            .map(|c| {
                let (key, modifiers) = key_for(c);
                self.press_with(key, modifiers, Some(&c.to_string()))
            })
            .collect()
    }

    /// Select the whole value of the focused element.
    pub fn select_all(&mut self) {
        let target = self.doc.focused().expect("an element has focus");
        let len = self.doc.value(target).chars().count();
        self.doc.set_selection(target, SelectionRange::new(0, len));
    }

    /// Place the caret in the focused element.
    pub fn set_caret(&mut self, pos: usize) {
        let target = self.doc.focused().expect("an element has focus");
        self.doc.set_selection(target, SelectionRange::caret(pos));
    }

    pub fn submit(&mut self) {
        let form = self.form;
        self.dispatch(WidgetEvent::Submit(SubmitEvent::new(form)));
    }
}

/// The key and modifiers that type `c` on a US layout.
pub fn key_for(c: char) -> (Key, KeyboardModifiers) {
    if let Some(digit) = c.to_digit(10) {
        return (Key::from_key_code(48 + digit), KeyboardModifiers::NONE);
    }
    if c.is_ascii_alphabetic() {
        let modifiers = if c.is_ascii_uppercase() {
            KeyboardModifiers::SHIFT
        } else {
            KeyboardModifiers::NONE
        };
        return (
            Key::from_key_code(c.to_ascii_uppercase() as u32),
            modifiers,
        );
    }
    match c {
        ' ' => (Key::Space, KeyboardModifiers::NONE),
        other => (Key::Character(other), KeyboardModifiers::NONE),
    }
}
