//! Field groups: the ordered segment and divider sequence of one value shape.
//!
//! A [`GroupShape`] describes a shape (which parts exist, how an existing
//! value is split across the segments, whether the mirrored value keeps the
//! dividers). Building a group happens in two steps so that a bad shape
//! never leaves elements behind:
//!
//! 1. [`GroupPlan::new`] validates the shape and the initial value without
//!    touching the host document.
//! 2. [`GroupPlan::mount`] creates the elements and returns the live
//!    [`FieldGroup`].
//!
//! Built-in shapes are [`DateShape`], [`PhoneShape`] and [`PostalCodeShape`].

mod date;
mod phone;
mod postal;

pub use date::DateShape;
pub use phone::{PhoneLayout, PhoneShape};
pub use postal::{Country, PostalCodeShape};

use std::fmt;

use intake_core::logging::targets;

use crate::config::IntakeMetrics;
use crate::error::{IntakeError, Result};
use crate::host::{Document, ElementId};

use super::divider::Divider;
use super::policy::CharClass;
use super::segment::{Segment, SegmentSpec};

/// Class name of the element holding the parts.
pub const PART_GROUP_CLASS: &str = "Intake-PartGroup";

/// Describes one part of a shape's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartSpec {
    /// An editable segment.
    Segment(SegmentSpec),
    /// A static divider with the given text.
    Divider(String),
}

impl PartSpec {
    /// An editable segment.
    pub fn segment(max_length: usize, class: CharClass, placeholder: impl Into<String>) -> Self {
        PartSpec::Segment(SegmentSpec::new(max_length, class, placeholder))
    }

    /// A static divider.
    pub fn divider(text: impl Into<String>) -> Self {
        PartSpec::Divider(text.into())
    }
}

/// Inline styles a shape applies to its part elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartStyle {
    /// Left margin of the first part.
    pub first_margin_left: Option<&'static str>,
    /// Style properties set on every part.
    pub every_part: Vec<(&'static str, &'static str)>,
}

/// A value shape: the layout of a field group and how values map onto it.
pub trait GroupShape: fmt::Debug + Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// The parts in display order.
    fn layout(&self) -> Vec<PartSpec>;

    /// Split an existing value into one entry per segment.
    ///
    /// `None` leaves a segment untouched. Entries are cleaned up to fit
    /// their segment before they are assigned.
    fn populate(&self, raw: &str) -> Vec<Option<String>>;

    /// Whether the host sink mirrors the assembled value (with dividers)
    /// rather than the raw segment contents.
    fn mirrors_assembled(&self) -> bool {
        false
    }

    /// Inline styles for the part elements.
    fn part_style(&self) -> PartStyle {
        PartStyle::default()
    }
}

/// A validated shape, ready to be mounted into a document.
#[derive(Debug)]
pub struct GroupPlan {
    shape: Box<dyn GroupShape>,
    layout: Vec<PartSpec>,
    initial: Option<Vec<Option<String>>>,
}

impl GroupPlan {
    /// Validate a shape and the value it will be populated with.
    ///
    /// The layout must hold at least one segment, every segment must
    /// have a positive maximum length and `populate` must return exactly one
    /// entry per segment.
    pub fn new(shape: Box<dyn GroupShape>, existing_value: &str) -> Result<Self> {
        let layout = shape.layout();
        let segment_count = layout
            .iter()
            .filter(|p| matches!(p, PartSpec::Segment(_)))
            .count();

        if segment_count == 0 {
            return Err(IntakeError::contract_violation(
                shape.name(),
                "layout contains no segments",
            ));
        }
        if let Some(position) = layout
            .iter()
            .position(|p| matches!(p, PartSpec::Segment(s) if s.max_length == 0))
        {
            return Err(IntakeError::contract_violation(
                shape.name(),
                format!("segment at position {position} has a zero max length"),
            ));
        }

        let entries = shape.populate(existing_value);
        if entries.len() != segment_count {
            return Err(IntakeError::contract_violation(
                shape.name(),
                format!(
                    "populate returned {} entries for {} segments",
                    entries.len(),
                    segment_count
                ),
            ));
        }
        let initial = (!existing_value.is_empty()).then_some(entries);

        Ok(Self {
            shape,
            layout,
            initial,
        })
    }

    /// The validated layout.
    pub fn layout(&self) -> &[PartSpec] {
        &self.layout
    }

    /// Create the group's elements under `parent` and populate them.
    pub fn mount<D: Document + ?Sized>(
        self,
        doc: &mut D,
        parent: ElementId,
        metrics: IntakeMetrics,
    ) -> FieldGroup {
        let element = doc.create_element("div");
        doc.set_class_name(element, PART_GROUP_CLASS);
        doc.append_child(parent, element);

        let style = self.shape.part_style();
        let mut parts = Vec::with_capacity(self.layout.len());
        for (index, spec) in self.layout.iter().enumerate() {
            let part = match spec {
                PartSpec::Segment(spec) => Part::Segment(Segment::create(doc, spec, &metrics)),
                PartSpec::Divider(text) => Part::Divider(Divider::create(doc, text, &metrics)),
            };
            if index == 0 {
                if let Some(margin) = style.first_margin_left {
                    doc.set_style(part.element(), "margin-left", margin);
                }
            }
            for (property, value) in &style.every_part {
                doc.set_style(part.element(), property, value);
            }
            doc.append_child(element, part.element());
            parts.push(part);
        }

        let mut group = FieldGroup {
            shape: self.shape,
            parts,
            element,
            metrics,
        };
        group.link_segments();
        if let Some(entries) = self.initial {
            group.apply_entries(doc, entries);
        }

        tracing::debug!(
            target: targets::GROUP,
            shape = group.name(),
            parts = group.parts.len(),
            segments = group.segment_indices().len(),
            "mounted field group"
        );
        group
    }
}

/// One part of a mounted group.
#[derive(Debug, Clone)]
pub enum Part {
    /// An editable segment.
    Segment(Segment),
    /// A static divider.
    Divider(Divider),
}

impl Part {
    /// The host element.
    pub fn element(&self) -> ElementId {
        match self {
            Part::Segment(s) => s.element(),
            Part::Divider(d) => d.element(),
        }
    }

    /// The displayed text: segment content or divider text.
    pub fn text(&self) -> &str {
        match self {
            Part::Segment(s) => s.content(),
            Part::Divider(d) => d.text(),
        }
    }

    /// The segment, if this part is one.
    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Part::Segment(s) => Some(s),
            Part::Divider(_) => None,
        }
    }

    fn as_segment_mut(&mut self) -> Option<&mut Segment> {
        match self {
            Part::Segment(s) => Some(s),
            Part::Divider(_) => None,
        }
    }
}

/// A mounted field group.
///
/// The part sequence is fixed after mounting. Consecutive segments of the
/// sequence are linked to each other as previous/next, by index.
#[derive(Debug)]
pub struct FieldGroup {
    shape: Box<dyn GroupShape>,
    parts: Vec<Part>,
    element: ElementId,
    metrics: IntakeMetrics,
}

impl FieldGroup {
    /// The shape this group was built from.
    pub fn shape(&self) -> &dyn GroupShape {
        self.shape.as_ref()
    }

    /// The shape name.
    pub fn name(&self) -> &str {
        self.shape.name()
    }

    /// The element holding the parts.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Layout metrics used for widths.
    pub fn metrics(&self) -> &IntakeMetrics {
        &self.metrics
    }

    /// All parts in display order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Part indices of the segments, in order.
    pub fn segment_indices(&self) -> Vec<usize> {
        self.parts
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_segment().map(|_| i))
            .collect()
    }

    /// The segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.parts.iter().filter_map(Part::as_segment)
    }

    /// The segment at part index `index`.
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.parts.get(index).and_then(Part::as_segment)
    }

    pub(crate) fn segment_mut(&mut self, index: usize) -> Option<&mut Segment> {
        self.parts.get_mut(index).and_then(Part::as_segment_mut)
    }

    /// Part index of the segment whose element is `element`.
    pub fn segment_index_of(&self, element: ElementId) -> Option<usize> {
        self.parts
            .iter()
            .position(|p| p.as_segment().is_some_and(|s| s.element() == element))
    }

    /// Whether `element` is one of this group's part elements.
    pub fn owns(&self, element: ElementId) -> bool {
        element == self.element || self.parts.iter().any(|p| p.element() == element)
    }

    /// Segment contents, in order.
    pub fn values(&self) -> Vec<&str> {
        self.segments().map(Segment::content).collect()
    }

    /// Whether every segment is filled to its maximum length.
    pub fn is_complete(&self) -> bool {
        self.segments().all(Segment::is_complete)
    }

    /// The assembled value: every part's text in display order, or `""`
    /// unless every segment is complete.
    pub fn assemble(&self) -> String {
        if !self.is_complete() {
            return String::new();
        }
        self.parts.iter().map(Part::text).collect()
    }

    /// Segment contents concatenated, without dividers.
    pub fn raw_value(&self) -> String {
        self.segments().map(Segment::content).collect()
    }

    /// The value mirrored into the host sink.
    pub fn mirrored_value(&self) -> String {
        if self.shape.mirrors_assembled() {
            self.assemble()
        } else {
            self.raw_value()
        }
    }

    /// Split `raw` across the segments. An empty value is a no-op.
    pub fn populate<D: Document + ?Sized>(&mut self, doc: &mut D, raw: &str) -> Result<()> {
        if raw.is_empty() {
            return Ok(());
        }
        let entries = self.shape.populate(raw);
        let count = self.segment_indices().len();
        if entries.len() != count {
            return Err(IntakeError::contract_violation(
                self.shape.name(),
                format!("populate returned {} entries for {count} segments", entries.len()),
            ));
        }
        self.apply_entries(doc, entries);
        Ok(())
    }

    fn apply_entries<D: Document + ?Sized>(&mut self, doc: &mut D, entries: Vec<Option<String>>) {
        let metrics = self.metrics;
        for (index, entry) in self.segment_indices().into_iter().zip(entries) {
            let Some(value) = entry else { continue };
            if let Some(segment) = self.segment_mut(index) {
                segment.set_content(doc, &value);
                segment.refresh_width(doc, &metrics);
            }
        }
        tracing::trace!(
            target: targets::GROUP,
            shape = self.shape.name(),
            values = ?self.values(),
            "populated"
        );
    }

    /// Empty every segment.
    pub fn clear<D: Document + ?Sized>(&mut self, doc: &mut D) {
        let metrics = self.metrics;
        for part in &mut self.parts {
            if let Part::Segment(segment) = part {
                segment.clear(doc, &metrics);
            }
        }
        tracing::trace!(target: targets::GROUP, shape = self.shape.name(), "cleared");
    }

    /// Re-read every segment from the host, trimming it to its maximum
    /// length, and refresh widths.
    pub fn trim_all<D: Document + ?Sized>(&mut self, doc: &mut D) {
        let metrics = self.metrics;
        for part in &mut self.parts {
            if let Part::Segment(segment) = part {
                segment.sync(doc);
                segment.refresh_width(doc, &metrics);
            }
        }
    }

    /// Part index of the first empty segment.
    pub fn first_empty_segment(&self) -> Option<usize> {
        self.parts
            .iter()
            .position(|p| p.as_segment().is_some_and(Segment::is_empty))
    }

    /// Part index of the first segment.
    pub fn first_segment(&self) -> Option<usize> {
        self.parts.iter().position(|p| p.as_segment().is_some())
    }

    /// Whether every segment is empty.
    pub fn is_fully_empty(&self) -> bool {
        self.segments().all(Segment::is_empty)
    }

    fn link_segments(&mut self) {
        let indices = self.segment_indices();
        for (position, &index) in indices.iter().enumerate() {
            let previous = position.checked_sub(1).map(|p| indices[p]);
            let next = indices.get(position + 1).copied();
            if let Some(segment) = self.segment_mut(index) {
                segment.set_links(previous, next);
            }
        }
    }
}
