//! Reading level data out of a Super Mario Bros. game image.
//!
//! A [`RomLayout`] names where the various tables live in the PRG data,
//! a [`RomImage`] wraps the raw bytes, and [`extract_game`] pulls a full
//! typed [`lakitu_model::Game`] out of the pair.

#![forbid(unsafe_code)]

pub mod error;
pub mod extract;
pub mod image;
pub mod layout;

pub use error::RomError;
pub use extract::extract_game;
pub use image::RomImage;
pub use layout::{LayoutError, RomLayout};
