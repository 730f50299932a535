//! The Intake widget controller.
//!
//! [`Intake`] owns one [`FieldGroup`], the clear button and the link to the
//! host's hidden value sink and form. It routes host events to the segment
//! state machine and mirrors the group's value into the sink.
//!
//! # Example
//!
//! ```
//! use intake::prelude::*;
//!
//! let mut doc = MemoryDocument::new();
//! let container = doc.create_with_id("div", "birthday");
//! let hidden = doc.create_with_id("input", "birthday-value");
//!
//! let intake = Intake::builder("#birthday")
//!     .hidden_sink("#birthday-value")
//!     .existing_value("01/02/2023")
//!     .options(DateOptions::new("MM/DD/YYYY", "/"))
//!     .build(&mut doc)?;
//!
//! assert_eq!(intake.container(), container);
//! assert_eq!(intake.assembled_value(), "01/02/2023");
//! assert_eq!(doc.value(hidden), "");
//! # Ok::<(), IntakeError>(())
//! ```
//!
//! # Focus
//!
//! When a keystroke or click moves focus between segments, the widget runs
//! the focus-out transition of the old segment, calls [`Document::focus`]
//! and runs the focus-in transition of the new one, all before returning.
//! Hosts only deliver focus events for focus changes they cause themselves.

use intake_core::logging::{span_names, targets};
use intake_core::{Property, Signal};

use crate::config::{IntakeMetrics, IntakeOptions};
use crate::error::{IntakeError, Result};
use crate::host::{Document, ElementId, ElementRef};

use super::events::{KeyPressEvent, KeyReleaseEvent, WidgetEvent};
use super::group::{FieldGroup, GroupPlan};
use super::keyboard::KeyClass;
use super::state_machine::{self, FocusMove};

/// Class of the container while no segment has focus.
pub const CONTAINER_CLASS: &str = "Intake-Container";
/// Class of the container while a segment has focus.
pub const CONTAINER_SELECTED_CLASS: &str = "Intake-Container Intake-Selected";
/// Class of the clear button.
pub const CLEAR_BUTTON_CLASS: &str = "fas fa-times-circle Intake-BtnClear";

type ChangeCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Builder implementing the construction contract of [`Intake`].
pub struct IntakeBuilder {
    container: ElementRef,
    form: Option<ElementRef>,
    existing_value: String,
    hidden_sink: Option<ElementRef>,
    options: Option<IntakeOptions>,
    on_change: Option<ChangeCallback>,
    metrics: IntakeMetrics,
}

impl std::fmt::Debug for IntakeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeBuilder")
            .field("container", &self.container)
            .field("form", &self.form)
            .field("existing_value", &self.existing_value)
            .field("hidden_sink", &self.hidden_sink)
            .field("options", &self.options)
            .field("on_change", &self.on_change.is_some())
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl IntakeBuilder {
    /// Start building a widget inside `container`.
    pub fn new(container: impl Into<ElementRef>) -> Self {
        Self {
            container: container.into(),
            form: None,
            existing_value: String::new(),
            hidden_sink: None,
            options: None,
            on_change: None,
            metrics: IntakeMetrics::default(),
        }
    }

    /// Set the form whose submission pushes the value into the sink.
    pub fn form(mut self, form: impl Into<ElementRef>) -> Self {
        self.form = Some(form.into());
        self
    }

    /// Set the value the segments are populated with.
    ///
    /// Dates are given with their divider; phone numbers and postal codes
    /// as raw characters.
    pub fn existing_value(mut self, value: impl Into<String>) -> Self {
        self.existing_value = value.into();
        self
    }

    /// Set the element whose value mirrors the widget's value.
    pub fn hidden_sink(mut self, sink: impl Into<ElementRef>) -> Self {
        self.hidden_sink = Some(sink.into());
        self
    }

    /// Set the options selecting the value shape. Required.
    pub fn options(mut self, options: impl Into<IntakeOptions>) -> Self {
        self.options = Some(options.into());
        self
    }

    /// Set a callback run with the mirrored value whenever a segment or the
    /// container loses focus.
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Set the character widths used to size parts.
    pub fn metrics(mut self, metrics: IntakeMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Build the widget.
    ///
    /// Every check (options, shape, initial value, element lookups) runs
    /// before the first element is created, so a failed build leaves the
    /// document untouched.
    pub fn build<D: Document + ?Sized>(self, doc: &mut D) -> Result<Intake> {
        let _span = tracing::debug_span!(target: targets::WIDGET, span_names::BUILD).entered();
        let prepared = self.prepare(doc).inspect_err(|err| {
            tracing::warn!(target: targets::WIDGET, error = %err, "failed to build widget");
        })?;
        let Prepared {
            container,
            form,
            hidden_sink,
            options,
            plan,
        } = prepared;
        let metrics = self.metrics;

        doc.add_class(container, CONTAINER_CLASS);
        doc.set_attribute(container, "tabindex", "-1");

        let group = plan.mount(doc, container, metrics);

        let clear_button = doc.create_element("i");
        doc.set_class_name(clear_button, CLEAR_BUTTON_CLASS);
        doc.append_child(container, clear_button);

        let intake = Intake {
            container,
            form,
            hidden_sink,
            clear_button,
            value: Property::new(group.mirrored_value()),
            group,
            options,
            value_changed: Signal::new(),
            editing_finished: Signal::new(),
        };
        intake.refresh_clear_button(doc);

        if let Some(callback) = self.on_change {
            intake
                .editing_finished
                .connect(move |value: &String| callback(value));
        }

        tracing::debug!(
            target: targets::WIDGET,
            kind = intake.options.kind(),
            segments = intake.group.segment_indices().len(),
            value = %intake.value.get(),
            "built widget"
        );
        Ok(intake)
    }

    fn prepare<D: Document + ?Sized>(&self, doc: &D) -> Result<Prepared> {
        let options = self.options.clone().ok_or(IntakeError::MissingOptions)?;
        let plan = GroupPlan::new(options.to_shape()?, &self.existing_value)?;

        let container = resolve(doc, &self.container)?;
        let form = self.form.as_ref().map(|r| resolve(doc, r)).transpose()?;
        let hidden_sink = self
            .hidden_sink
            .as_ref()
            .map(|r| resolve(doc, r))
            .transpose()?;

        Ok(Prepared {
            container,
            form,
            hidden_sink,
            options,
            plan,
        })
    }
}

struct Prepared {
    container: ElementId,
    form: Option<ElementId>,
    hidden_sink: Option<ElementId>,
    options: IntakeOptions,
    plan: GroupPlan,
}

fn resolve<D: Document + ?Sized>(doc: &D, reference: &ElementRef) -> Result<ElementId> {
    reference.resolve(doc).ok_or_else(|| IntakeError::ElementNotFound {
        selector: match reference {
            ElementRef::Selector(s) => s.clone(),
            ElementRef::Handle(id) => format!("{id:?}"),
        },
    })
}

/// A segmented input widget.
///
/// # Signals
///
/// - `value_changed`: the mirrored value changed
/// - `editing_finished`: a segment or the container lost focus
pub struct Intake {
    container: ElementId,
    form: Option<ElementId>,
    hidden_sink: Option<ElementId>,
    clear_button: ElementId,
    group: FieldGroup,
    options: IntakeOptions,
    value: Property<String>,

    /// Emitted with the new mirrored value whenever it changes.
    pub value_changed: Signal<String>,
    /// Emitted with the mirrored value on every blur.
    pub editing_finished: Signal<String>,
}

impl std::fmt::Debug for Intake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intake")
            .field("container", &self.container)
            .field("form", &self.form)
            .field("hidden_sink", &self.hidden_sink)
            .field("group", &self.group)
            .field("options", &self.options)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl Intake {
    /// Start building a widget inside `container`.
    pub fn builder(container: impl Into<ElementRef>) -> IntakeBuilder {
        IntakeBuilder::new(container)
    }

    /// The container element.
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// The form, if one was given.
    pub fn form(&self) -> Option<ElementId> {
        self.form
    }

    /// The hidden value sink, if one was given.
    pub fn hidden_sink(&self) -> Option<ElementId> {
        self.hidden_sink
    }

    /// The clear button element.
    pub fn clear_button(&self) -> ElementId {
        self.clear_button
    }

    /// The field group.
    pub fn group(&self) -> &FieldGroup {
        &self.group
    }

    /// The options the widget was built with.
    pub fn options(&self) -> &IntakeOptions {
        &self.options
    }

    /// The last mirrored value.
    pub fn value(&self) -> String {
        self.value.get()
    }

    /// The divider-joined value, or `""` while incomplete.
    pub fn assembled_value(&self) -> String {
        self.group.assemble()
    }

    /// The segment contents without dividers.
    pub fn raw_value(&self) -> String {
        self.group.raw_value()
    }

    /// Handle an event from the host.
    ///
    /// Returns `true` if the event targeted an element this widget owns (or
    /// its form) and was handled. Check
    /// [`WidgetEvent::is_default_suppressed`] afterwards to learn whether the
    /// host must skip its default action.
    pub fn handle_event<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        event: &mut WidgetEvent,
    ) -> bool {
        let target = event.target();
        let segment = self.group.segment_index_of(target);

        match (event, segment) {
            (WidgetEvent::KeyPress(e), Some(index)) => self.key_press(doc, index, e),
            (WidgetEvent::KeyRelease(e), Some(index)) => self.key_release(doc, index, e),
            (WidgetEvent::FocusIn(_), Some(index)) => self.segment_focus_in(doc, index),
            (WidgetEvent::FocusOut(_), Some(index)) => self.segment_focus_out(doc, index),
            (WidgetEvent::Click(_), Some(index)) => {
                let destination = self.group.first_empty_segment().unwrap_or(index);
                self.transfer_focus(doc, destination);
            }
            (WidgetEvent::Paste(e), Some(_)) => e.base.suppress_default(),

            (WidgetEvent::Click(_), None) if target == self.clear_button => {
                self.clear(doc);
                self.focus_first_empty(doc);
            }
            (WidgetEvent::Click(_), None) if self.is_container_area(target) => {
                self.focus_first_empty(doc);
            }
            (WidgetEvent::FocusOut(_), None) if target == self.container => {
                self.container_blur(doc);
            }
            (WidgetEvent::Submit(_), None) if Some(target) == self.form => self.submit(doc),
            _ => return false,
        }
        true
    }

    /// Empty every segment and mirror the empty value.
    pub fn clear<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.group.clear(doc);
        self.refresh_clear_button(doc);
        self.publish(doc);
    }

    /// Populate the segments from a value, as at construction, and mirror it.
    pub fn populate<D: Document + ?Sized>(&mut self, doc: &mut D, raw: &str) -> Result<()> {
        self.group.populate(doc, raw)?;
        self.refresh_clear_button(doc);
        self.publish(doc);
        Ok(())
    }

    /// Push the mirrored value into the sink and notify, as on form submit.
    pub fn submit<D: Document + ?Sized>(&mut self, doc: &mut D) {
        tracing::debug!(target: targets::WIDGET, "form submitted");
        self.publish(doc);
    }

    /// Detach every element the widget created from the container.
    pub fn destroy<D: Document + ?Sized>(self, doc: &mut D) {
        for child in doc.children(self.container) {
            doc.remove_child(self.container, child);
        }
        self.value_changed.disconnect_all();
        self.editing_finished.disconnect_all();
        tracing::debug!(target: targets::WIDGET, kind = self.options.kind(), "destroyed widget");
    }

    fn is_container_area(&self, element: ElementId) -> bool {
        element == self.container || self.group.owns(element)
    }

    fn key_press<D: Document + ?Sized>(&mut self, doc: &mut D, index: usize, e: &mut KeyPressEvent) {
        let Some(segment) = self.group.segment_mut(index) else {
            return;
        };
        let _span = tracing::trace_span!(target: targets::KEYS, span_names::KEY_EVENT, index).entered();

        // The guard only holds back a segment that was already full on arrival.
        let ctx = segment.context(doc);
        if !ctx.is_complete() {
            segment.clear_focus_flag();
        }

        let class = KeyClass::classify(e.key, e.modifiers);
        let decision = state_machine::key_down(&ctx, class);
        if decision.suppress_default {
            e.base.suppress_default();
        }
        if let Some(direction) = decision.focus {
            self.move_focus(doc, index, direction);
        }
    }

    fn key_release<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        index: usize,
        e: &mut KeyReleaseEvent,
    ) {
        let metrics = *self.group.metrics();
        let Some(segment) = self.group.segment_mut(index) else {
            return;
        };
        let _span = tracing::trace_span!(target: targets::KEYS, span_names::KEY_EVENT, index).entered();

        segment.sync(doc);
        let class = KeyClass::classify(e.key, e.modifiers);
        let decision = state_machine::key_up(&segment.context(doc), class);
        if decision.suppress_default {
            e.base.suppress_default();
        }
        if decision.refresh_width {
            segment.refresh_width(doc, &metrics);
        }
        if let Some(direction) = decision.focus {
            self.move_focus(doc, index, direction);
        }

        self.publish(doc);
        if let Some(segment) = self.group.segment_mut(index) {
            segment.clear_focus_flag();
        }
        self.refresh_clear_button(doc);
    }

    fn move_focus<D: Document + ?Sized>(&mut self, doc: &mut D, from: usize, direction: FocusMove) {
        let Some(segment) = self.group.segment(from) else {
            return;
        };
        let destination = match direction {
            FocusMove::Previous => segment.previous(),
            FocusMove::Next => segment.next(),
        };
        if let Some(destination) = destination {
            self.transfer_focus(doc, destination);
        }
    }

    fn focus_first_empty<D: Document + ?Sized>(&mut self, doc: &mut D) {
        let destination = self
            .group
            .first_empty_segment()
            .or_else(|| self.group.first_segment());
        if let Some(destination) = destination {
            self.transfer_focus(doc, destination);
        }
    }

    /// Move host focus to a segment, running the blur of whatever part of
    /// the widget held it and the focus-in of the destination.
    fn transfer_focus<D: Document + ?Sized>(&mut self, doc: &mut D, destination: usize) {
        let Some(element) = self.group.segment(destination).map(|s| s.element()) else {
            return;
        };
        let current = doc.focused();
        if current == Some(element) {
            return;
        }

        match current {
            Some(c) if c == self.container => self.container_blur(doc),
            Some(c) => {
                if let Some(previous) = self.group.segment_index_of(c) {
                    self.segment_focus_out(doc, previous);
                }
            }
            None => {}
        }

        tracing::trace!(target: targets::WIDGET, from = ?current, to = destination, "moving focus");
        doc.focus(element);
        self.segment_focus_in(doc, destination);
    }

    fn segment_focus_in<D: Document + ?Sized>(&mut self, doc: &mut D, index: usize) {
        if let Some(segment) = self.group.segment_mut(index) {
            segment.mark_focus_gained();
            doc.set_class_name(self.container, CONTAINER_SELECTED_CLASS);
        }
    }

    fn segment_focus_out<D: Document + ?Sized>(&mut self, doc: &mut D, index: usize) {
        let metrics = *self.group.metrics();
        let Some(segment) = self.group.segment_mut(index) else {
            return;
        };
        segment.sync(doc);
        segment.refresh_width(doc, &metrics);

        self.publish(doc);
        self.editing_finished.emit(self.value.get());
        doc.set_class_name(self.container, CONTAINER_CLASS);
    }

    fn container_blur<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.group.trim_all(doc);
        self.publish(doc);
        self.editing_finished.emit(self.value.get());
    }

    /// Write the mirrored value into the sink, dispatch a change on it and
    /// emit `value_changed` if the value differs from the last one.
    fn publish<D: Document + ?Sized>(&mut self, doc: &mut D) {
        let value = self.group.mirrored_value();
        if let Some(sink) = self.hidden_sink {
            doc.set_value(sink, &value);
            doc.dispatch_change(sink);
        }
        if self.value.set(value.clone()) {
            tracing::trace!(target: targets::WIDGET, %value, "value changed");
            self.value_changed.emit(value);
        }
    }

    fn refresh_clear_button<D: Document + ?Sized>(&self, doc: &mut D) {
        let display = if self.group.is_fully_empty() {
            "none"
        } else {
            "block"
        };
        doc.set_style(self.clear_button, "display", display);
    }
}
