mod context;
pub mod extract;
pub mod init;
pub mod run;

pub use context::{CommandContext, apply_overrides, source_root};
