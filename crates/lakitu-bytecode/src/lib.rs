//! Codec for the two command streams that define a Super Mario Bros. area:
//! geography (terrain) and population (sprites).
//!
//! Both streams are sequences of little commands carrying page-relative
//! X coordinates; the codec converts between the raw bytes and the typed
//! actors of `lakitu-model`, absorbing all page arithmetic so the model
//! only ever sees absolute coordinates.

#![forbid(unsafe_code)]

mod command;
mod reader;

pub mod error;
pub mod geography;
pub mod population;

pub use error::BytecodeError;
pub use geography::{parse_geography, unparse_geography, GEOGRAPHY_END};
pub use population::{parse_population, unparse_population, POPULATION_END};
