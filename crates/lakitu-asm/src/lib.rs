//! Turning a game model back into ca65-style assembly: labelled `.byte`
//! tables for area data, address lists and the scenario, ready for
//! inclusion in a disassembly build.

#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod format;

pub use error::AsmError;
pub use export::export_bundle;
pub use format::{format_bytes, game_tables};
