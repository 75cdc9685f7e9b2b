//! Diagnostic system for front-end error reporting.
//!
//! Every error a stage can raise maps to an [`ErrorCode`] and renders to a
//! [`Diagnostic`]: a code, a message, labeled spans and notes. Emitters turn
//! diagnostics into text for a sink.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
