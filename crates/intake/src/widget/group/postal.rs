use std::fmt;
use std::str::FromStr;

use crate::error::{IntakeError, Result};
use crate::widget::policy::CharClass;

use super::{GroupShape, PartSpec};

/// Countries with a built-in postal code shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    /// Five-digit ZIP code.
    Usa,
    /// Six-character alphanumeric postal code.
    Canada,
}

impl Country {
    /// The country name as written in options.
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Usa => "USA",
            Country::Canada => "Canada",
        }
    }

    /// Character class and maximum length of the country's postal code.
    pub fn segment_shape(&self) -> (CharClass, usize) {
        match self {
            Country::Usa => (CharClass::Numeric, 5),
            Country::Canada => (CharClass::FreeText, 6),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = IntakeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "USA" => Ok(Country::Usa),
            "Canada" => Ok(Country::Canada),
            other => Err(IntakeError::UnrecognizedCountry {
                country: other.to_string(),
            }),
        }
    }
}

/// A postal code in a single segment.
///
/// The placeholder is blank, one space per character. Existing values go
/// into the segment whole and are trimmed to fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCodeShape {
    class: CharClass,
    max_length: usize,
}

impl PostalCodeShape {
    /// The postal code shape of a country.
    pub fn for_country(country: Country) -> Self {
        let (class, max_length) = country.segment_shape();
        Self { class, max_length }
    }

    /// A custom postal code shape.
    ///
    /// Fails with [`IntakeError::MissingShapeParameters`] when no maximum
    /// length is given.
    pub fn custom(is_numeric: bool, max_length: Option<usize>) -> Result<Self> {
        let max_length = max_length
            .filter(|m| *m > 0)
            .ok_or(IntakeError::MissingShapeParameters)?;
        let class = if is_numeric {
            CharClass::Numeric
        } else {
            CharClass::FreeText
        };
        Ok(Self { class, max_length })
    }

    /// The segment's character class.
    pub fn char_class(&self) -> CharClass {
        self.class
    }

    /// The segment's maximum length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl GroupShape for PostalCodeShape {
    fn name(&self) -> &str {
        "postal_code"
    }

    fn layout(&self) -> Vec<PartSpec> {
        vec![PartSpec::segment(
            self.max_length,
            self.class,
            " ".repeat(self.max_length),
        )]
    }

    fn populate(&self, raw: &str) -> Vec<Option<String>> {
        vec![Some(raw.to_string())]
    }
}
