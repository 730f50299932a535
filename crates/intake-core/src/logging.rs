//! Logging facilities for Intake.
//!
//! Intake uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("intake=debug,intake::keys=trace")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Widget construction is logged at `debug`, construction failures at
//! `warn`, and every key-handling decision at `trace`.

/// Span names used throughout Intake for tracing.
pub mod span_names {
    /// Signal emission span.
    pub const SIGNAL: &str = "intake::signal";
    /// Widget construction span.
    pub const BUILD: &str = "intake::build";
    /// Key event handling span.
    pub const KEY_EVENT: &str = "intake::key_event";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "intake_core::signal";
    /// Widget controller target (construction, mirroring, teardown).
    pub const WIDGET: &str = "intake::widget";
    /// Key classification and state machine target.
    pub const KEYS: &str = "intake::keys";
    /// Field-group assembly target.
    pub const GROUP: &str = "intake::group";
    /// Host document target.
    pub const HOST: &str = "intake::host";
}
