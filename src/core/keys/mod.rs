//! Translation key generation.
//!
//! Keys are built from the file path and a camel-cased rendering of the text
//! in the key language, and stay stable across runs through the
//! [`KeyRegistry`] reverse index.

pub mod generator;
pub mod naming;
pub mod registry;

pub use generator::{
    CounterStyle, KeyConfig, KeyGenerator, KeyParams, KeyRequest, KeyStrategy, KeyStyle, PrefixOnly,
};
pub use registry::KeyRegistry;
