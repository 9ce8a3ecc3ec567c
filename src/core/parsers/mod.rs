//! Source parsers.
//!
//! - `script`: JS/TS/JSX/TSX via swc
//! - `markup`: tolerant HTML element tree

pub mod markup;
pub mod script;
