//! autoi18n - extract translatable text and generate i18n keys
//!
//! autoi18n scans JavaScript/TypeScript, Vue and HTML sources for
//! human-readable text in a configured source language, turns templates and
//! mixed markup into placeholder strings, assigns each distinct text a stable
//! key and writes per-language key catalogs.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine, key generation, translation and catalogs
//! - `utils`: Shared utility functions
//! - `warnings`: Warning types and the persisted warning log

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
pub mod warnings;
