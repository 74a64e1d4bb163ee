//! Typed model of Super Mario Bros. level data: area headers, geography and
//! population actors, areas, the atlas, and the scenario.

#![forbid(unsafe_code)]

pub mod area;
pub mod atlas;
pub mod error;
pub mod game;
pub mod geography;
pub mod header;
pub mod population;
pub mod scenario;

pub use area::{Area, Environment};
pub use atlas::Atlas;
pub use error::ModelError;
pub use game::Game;
pub use geography::Geography;
pub use header::AreaHeader;
pub use population::Population;
pub use scenario::{Level, Scenario, World};
