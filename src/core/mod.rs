//! Extraction and key-generation engine.
//!
//! Leaf modules first:
//!
//! - `interpolation`, `validity`, `complexity`: the text model
//! - `parsers`, `extract`: per-dialect extraction and the orchestrator
//! - `keys`: key generation with a persistent reverse index
//! - `file_scanner`, `translate`, `catalog`, `pipeline`: the run around them

pub mod catalog;
pub mod complexity;
pub mod extract;
pub mod file_scanner;
pub mod interpolation;
pub mod keys;
pub mod parsers;
pub mod pipeline;
pub mod text;
pub mod translate;
pub mod validity;
