use std::fmt;
use std::str::FromStr;

use crate::error::IntakeError;
use crate::widget::policy::CharClass;

use super::{GroupShape, PartSpec, PartStyle};

/// The two supported phone number layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneLayout {
    /// `(XXX)XXX-XXXX`
    Parenthesized,
    /// `XXX-XXX-XXXX`
    Hyphenated,
}

impl PhoneLayout {
    /// The format literal of this layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneLayout::Parenthesized => "(XXX)XXX-XXXX",
            PhoneLayout::Hyphenated => "XXX-XXX-XXXX",
        }
    }
}

impl fmt::Display for PhoneLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhoneLayout {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "(XXX)XXX-XXXX" => Ok(PhoneLayout::Parenthesized),
            "XXX-XXX-XXXX" => Ok(PhoneLayout::Hyphenated),
            other => Err(IntakeError::InvalidPhoneFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Segment lengths of a phone number: area code, exchange, line.
const SEGMENT_LENGTHS: [usize; 3] = [3, 3, 4];

/// A ten-digit phone number in three numeric segments.
///
/// Existing values are raw digits (`5551234567`); the mirrored value is the
/// raw digits as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneShape {
    layout: PhoneLayout,
    placeholder: char,
}

impl PhoneShape {
    /// Create a phone shape. Only the first character of `placeholder` is
    /// used; an empty string means a space.
    pub fn new(layout: PhoneLayout, placeholder: &str) -> Self {
        Self {
            layout,
            placeholder: placeholder.chars().next().unwrap_or(' '),
        }
    }

    /// The layout.
    pub fn phone_layout(&self) -> PhoneLayout {
        self.layout
    }

    /// The placeholder character.
    pub fn placeholder_char(&self) -> char {
        self.placeholder
    }

    fn segment(&self, length: usize) -> PartSpec {
        let placeholder: String = std::iter::repeat_n(self.placeholder, length).collect();
        PartSpec::segment(length, CharClass::Numeric, placeholder)
    }
}

impl GroupShape for PhoneShape {
    fn name(&self) -> &str {
        "phone"
    }

    fn layout(&self) -> Vec<PartSpec> {
        let [area, exchange, line] = SEGMENT_LENGTHS;
        match self.layout {
            PhoneLayout::Parenthesized => vec![
                PartSpec::divider("("),
                self.segment(area),
                PartSpec::divider(")"),
                self.segment(exchange),
                PartSpec::divider("-"),
                self.segment(line),
            ],
            PhoneLayout::Hyphenated => vec![
                self.segment(area),
                PartSpec::divider("-"),
                self.segment(exchange),
                PartSpec::divider("-"),
                self.segment(line),
            ],
        }
    }

    fn populate(&self, raw: &str) -> Vec<Option<String>> {
        let mut offset = 0;
        SEGMENT_LENGTHS
            .iter()
            .map(|&length| {
                let value: String = raw.chars().skip(offset).take(length).collect();
                offset += length;
                Some(value)
            })
            .collect()
    }

    fn part_style(&self) -> PartStyle {
        PartStyle {
            first_margin_left: Some("2px"),
            every_part: vec![("text-align", "left")],
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
    fn test_layout_from_str() {
        assert_eq!(
            "(XXX)XXX-XXXX".parse::<PhoneLayout>().unwrap(),
            PhoneLayout::Parenthesized
        );
        assert_eq!(
            "XXX-XXX-XXXX".parse::<PhoneLayout>().unwrap(),
            PhoneLayout::Hyphenated
        );
        assert!(matches!(
            "XXX-XXX-XXX".parse::<PhoneLayout>(),
            Err(IntakeError::InvalidPhoneFormat { .. })
        ));
    }

    #[test]
    fn test_placeholder_uses_first_char() {
        let shape = PhoneShape::new(PhoneLayout::Hyphenated, "#*");
        assert_eq!(shape.layout()[0], PartSpec::segment(3, CharClass::Numeric, "###"));
        assert_eq!(shape.layout()[4], PartSpec::segment(4, CharClass::Numeric, "####"));

        let shape = PhoneShape::new(PhoneLayout::Hyphenated, "");
        assert_eq!(shape.placeholder_char(), ' ');
    }

    #[test]
    fn test_populate_splits_fixed_offsets() {
        let shape = PhoneShape::new(PhoneLayout::Parenthesized, " ");
        assert_eq!(
            shape.populate("5551234567"),
            vec![Some("555".into()), Some("123".into()), Some("4567".into())]
        );
        assert_eq!(
            shape.populate("55512"),
            vec![Some("555".into()), Some("12".into()), Some(String::new())]
        );
    }

    #[test]
    fn test_parenthesized_group() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let shape = PhoneShape::new(PhoneLayout::Parenthesized, "_");
        let group = GroupPlan::new(Box::new(shape), "5551234567")
            .unwrap()
            .mount(&mut doc, root, IntakeMetrics::default());

        assert_eq!(group.segment_indices(), vec![1, 3, 5]);
        assert_eq!(group.values(), vec!["555", "123", "4567"]);
        assert_eq!(group.parts()[0].text(), "(");
        assert_eq!(group.assemble(), "(555)123-4567");
        assert_eq!(group.mirrored_value(), "5551234567");
        assert_eq!(doc.attribute(group.parts()[1].element(), "placeholder").as_deref(), Some("___"));
    }
}
