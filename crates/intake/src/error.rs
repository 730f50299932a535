//! Error types for Intake.
//!
//! Every error is raised while constructing a widget and aborts construction
//! before any element is created in the host document. Runtime event handling
//! never fails: unrecognized keys degrade to the safe default of the segment's
//! character class.

/// Result type alias for Intake operations.
pub type Result<T> = std::result::Result<T, IntakeError>;

/// Errors that can occur while constructing an Intake widget.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// No options were supplied.
    #[error("Options must be provided to generate an Intake widget")]
    MissingOptions,

    /// The options value is not one of the date, phone or postal code records.
    #[error("Unrecognized options provided: {0}")]
    UnrecognizedOptions(String),

    /// The phone layout is not one of the two recognized literals.
    #[error("Invalid phone format '{format}', expected '(XXX)XXX-XXXX' or 'XXX-XXX-XXXX'")]
    InvalidPhoneFormat { format: String },

    /// The postal code country is not recognized.
    #[error("Unrecognized country '{country}' provided for postal code options")]
    UnrecognizedCountry { country: String },

    /// Postal code options gave neither a country nor a maximum length.
    #[error("max_length must be provided when country is omitted from postal code options")]
    MissingShapeParameters,

    /// The date format cannot be split into non-empty parts by the divider.
    #[error("Invalid date format '{format}' for divider '{divider}'")]
    InvalidDateFormat { format: String, divider: String },

    /// A field-group shape did not supply a usable layout or populate result.
    #[error("Shape '{shape}' violates the field-group contract: {reason}")]
    SubclassContractViolation { shape: String, reason: String },

    /// A selector did not resolve to an element of the host document.
    #[error("No element matches selector '{selector}'")]
    ElementNotFound { selector: String },

    /// The options record could not be parsed.
    #[error("Failed to parse options: {0}")]
    Config(String),
}

impl IntakeError {
    /// Create a contract violation error for a shape.
    pub fn contract_violation(shape: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SubclassContractViolation {
            shape: shape.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::de::Error> for IntakeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
