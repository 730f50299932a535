//! Construction options and layout metrics.
//!
//! Options select the value shape of a widget. They can be built in code or
//! loaded from JSON or TOML, where the record is keyed by its variant:
//!
//! ```
//! use intake::config::IntakeOptions;
//!
//! let opts = IntakeOptions::from_json(r#"{"date": {"format": "MM/DD/YYYY", "divider": "/"}}"#)?;
//! assert!(matches!(opts, IntakeOptions::Date(_)));
//!
//! let opts = IntakeOptions::from_toml("[postal_code]\ncountry = \"Canada\"\n")?;
//! assert!(matches!(opts, IntakeOptions::PostalCode(_)));
//! # Ok::<(), intake::IntakeError>(())
//! ```
//!
//! Options are only parsed here. Layout strings and country names are
//! checked when the shape is built, so a bad phone format is reported as
//! [`IntakeError::InvalidPhoneFormat`] rather than a parse error.

use serde::{Deserialize, Serialize};

use crate::error::{IntakeError, Result};
use crate::widget::group::{
    Country, DateShape, GroupShape, PhoneLayout, PhoneShape, PostalCodeShape,
};

/// Options of a date widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOptions {
    /// The format, e.g. `MM/DD/YYYY`. Its parts become the placeholders.
    pub format: String,
    /// The text between the parts.
    pub divider: String,
}

impl DateOptions {
    pub fn new(format: impl Into<String>, divider: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            divider: divider.into(),
        }
    }
}

fn default_placeholder_character() -> String {
    " ".to_string()
}

/// Options of a phone widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneOptions {
    /// `(XXX)XXX-XXXX` or `XXX-XXX-XXXX`.
    pub format: String,
    /// Placeholder character; only the first character is used.
    #[serde(default = "default_placeholder_character")]
    pub placeholder_character: String,
}

impl PhoneOptions {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            placeholder_character: default_placeholder_character(),
        }
    }

    /// Set the placeholder character.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder_character = placeholder.into();
        self
    }
}

/// Options of a postal code widget.
///
/// Either a country, or a maximum length with an optional numeric flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostalCodeOptions {
    /// `USA` or `Canada`.
    pub country: Option<String>,
    /// Whether only digits are accepted when no country is given.
    pub is_numeric: Option<bool>,
    /// Maximum length when no country is given.
    pub max_length: Option<usize>,
}

impl PostalCodeOptions {
    /// Options for a country's postal code.
    pub fn country(country: impl Into<String>) -> Self {
        Self {
            country: Some(country.into()),
            ..Self::default()
        }
    }

    /// Options for a custom postal code.
    pub fn custom(is_numeric: bool, max_length: usize) -> Self {
        Self {
            country: None,
            is_numeric: Some(is_numeric),
            max_length: Some(max_length),
        }
    }
}

/// The options record selecting a widget's value shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeOptions {
    Date(DateOptions),
    Phone(PhoneOptions),
    PostalCode(PostalCodeOptions),
}

impl IntakeOptions {
    const TAGS: [&'static str; 3] = ["date", "phone", "postal_code"];

    /// Parse options from a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json_value(value)
    }

    /// Parse options from a TOML document with one `[date]`, `[phone]` or
    /// `[postal_code]` table.
    pub fn from_toml(text: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(text)?;
        Self::from_json_value(serde_json::to_value(table)?)
    }

    /// Convert a JSON value.
    ///
    /// `null` is [`IntakeError::MissingOptions`]; anything that is not an
    /// object with exactly one known variant key is
    /// [`IntakeError::UnrecognizedOptions`].
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let recognized = match &value {
            serde_json::Value::Null => return Err(IntakeError::MissingOptions),
            serde_json::Value::Object(map) => {
                map.len() == 1 && map.keys().all(|k| Self::TAGS.contains(&k.as_str()))
            }
            _ => false,
        };
        if !recognized {
            return Err(IntakeError::UnrecognizedOptions(value.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Name of the selected variant.
    pub fn kind(&self) -> &'static str {
        match self {
            IntakeOptions::Date(_) => "date",
            IntakeOptions::Phone(_) => "phone",
            IntakeOptions::PostalCode(_) => "postal_code",
        }
    }

    /// Build the value shape these options describe.
    pub fn to_shape(&self) -> Result<Box<dyn GroupShape>> {
        let shape: Box<dyn GroupShape> = match self {
            IntakeOptions::Date(opts) => Box::new(DateShape::new(&opts.format, &opts.divider)?),
            IntakeOptions::Phone(opts) => {
                let layout: PhoneLayout = opts.format.parse()?;
                Box::new(PhoneShape::new(layout, &opts.placeholder_character))
            }
            IntakeOptions::PostalCode(opts) => match &opts.country {
                Some(country) => {
                    let country: Country = country.parse()?;
                    Box::new(PostalCodeShape::for_country(country))
                }
                None => Box::new(PostalCodeShape::custom(
                    opts.is_numeric.unwrap_or(false),
                    opts.max_length,
                )?),
            },
        };
        Ok(shape)
    }
}

impl From<DateOptions> for IntakeOptions {
    fn from(opts: DateOptions) -> Self {
        IntakeOptions::Date(opts)
    }
}

impl From<PhoneOptions> for IntakeOptions {
    fn from(opts: PhoneOptions) -> Self {
        IntakeOptions::Phone(opts)
    }
}

impl From<PostalCodeOptions> for IntakeOptions {
    fn from(opts: PostalCodeOptions) -> Self {
        IntakeOptions::PostalCode(opts)
    }
}

/// Character widths used to size parts, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeMetrics {
    /// Width of one character in a segment.
    pub segment_char_width: f64,
    /// Width of one character in a divider.
    pub divider_char_width: f64,
}

impl Default for IntakeMetrics {
    fn default() -> Self {
        Self {
            segment_char_width: 7.7,
            divider_char_width: 7.2,
        }
    }
}
