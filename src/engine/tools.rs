//! Formatting and panic-payload helpers

use std::any::Any;

/// Text form of a minimum as written to the output file.
///
/// Shortest round-trip formatting with a fractional part: `1.0`, `-2.5`, `1e-7`, `inf`.
/// Every string produced parses back to the same value.
pub fn format_min(value: f64) -> String {
    format!("{:?}", value)
}

/// Best-effort message from a panic payload (`&str` or `String`), for logging worker panics.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
