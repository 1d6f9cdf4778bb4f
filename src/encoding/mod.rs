//! Exposition Encoding
//!
//! Renders registry state as a plaintext exposition document.

mod text;

pub use text::{encode, escape_label_value, format_float, Format};
