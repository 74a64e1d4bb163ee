//! Where the level-data tables live in a game image.
//!
//! The defaults describe the standalone US/JP image with the 16-byte
//! iNES header stripped. Modified images can override any field through
//! a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// PRG offsets of every table the extractor reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RomLayout {
    /// Packed halfway-page nybbles, two levels per byte, two bytes per
    /// world.
    pub checkpoint_table: usize,
    /// Per-world starting offsets into the area-index table.
    pub world_offset_table: usize,
    /// Area index numbers, one per level, grouped by world.
    pub area_index_table: usize,
    /// Per-environment starting positions in the population address
    /// tables.
    pub population_environment_offsets: usize,
    pub population_address_lsbs: usize,
    pub population_address_msbs: usize,
    /// Per-environment starting positions in the geography address
    /// tables.
    pub geography_environment_offsets: usize,
    pub geography_address_lsbs: usize,
    pub geography_address_msbs: usize,
    /// Coin prices of the per-world hidden 1-up blocks.
    pub hidden_1up_price_table: usize,
    /// Areas per environment, in environment-id order.
    pub area_counts: [usize; 4],
    /// Levels in each world's area-index run.
    pub levels_per_world: Vec<u8>,
}

impl Default for RomLayout {
    fn default() -> Self {
        Self {
            checkpoint_table: 0x11BD,
            world_offset_table: 0x1CB4,
            area_index_table: 0x1CBC,
            population_environment_offsets: 0x1CE0,
            population_address_lsbs: 0x1CE4,
            population_address_msbs: 0x1D06,
            geography_environment_offsets: 0x1D28,
            geography_address_lsbs: 0x1D2C,
            geography_address_msbs: 0x1D4E,
            hidden_1up_price_table: 0x32C2,
            area_counts: [3, 22, 3, 6],
            levels_per_world: vec![5, 5, 4, 5, 4, 4, 5, 4],
        }
    }
}

impl RomLayout {
    /// Total number of areas across all environments.
    pub fn area_total(&self) -> usize {
        self.area_counts.iter().sum()
    }

    /// Read a layout override from a TOML file. Omitted fields keep
    /// their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_path(path: &Path) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path).map_err(|e| LayoutError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let layout: Self = toml::from_str(&content).map_err(|e| LayoutError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(layout)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid layout file at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_tables_are_consistent() {
        let layout = RomLayout::default();
        assert_eq!(34, layout.area_total());
        // The MSB tables sit exactly one table-length past the LSBs.
        assert_eq!(
            layout.population_address_msbs,
            layout.population_address_lsbs + layout.area_total()
        );
        assert_eq!(
            layout.geography_address_msbs,
            layout.geography_address_lsbs + layout.area_total()
        );
        assert_eq!(8, layout.levels_per_world.len());
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("layout.toml");
        fs::write(&path, "checkpoint_table = 0x2000\n").unwrap_or_else(|e| panic!("{e}"));
        let layout = RomLayout::from_path(&path).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(0x2000, layout.checkpoint_table);
        assert_eq!(0x1CB4, layout.world_offset_table);
        assert_eq!([3, 22, 3, 6], layout.area_counts);
    }

    #[test]
    fn garbage_layout_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("layout.toml");
        fs::write(&path, "checkpoint_table = \"not an offset\"").unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            RomLayout::from_path(&path),
            Err(LayoutError::Parse { .. })
        ));
    }

    #[test]
    fn missing_layout_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            RomLayout::from_path(&dir.path().join("absent.toml")),
            Err(LayoutError::Read { .. })
        ));
    }
}
