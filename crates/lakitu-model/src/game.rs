//! The top-level game document: an atlas plus a scenario, persisted as a
//! JSON project file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::atlas::Atlas;
use crate::error::ModelError;
use crate::scenario::Scenario;

/// A whole game: every area and the scenario that orders them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Free-form project name.
    #[serde(default)]
    pub id: String,
    pub atlas: Atlas,
    pub scenario: Scenario,
}

impl Game {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            atlas: Atlas::new(),
            scenario: Scenario::default(),
        }
    }

    /// Read and parse a project file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid
    /// project document.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|e| ModelError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let game: Self = serde_json::from_str(&content).map_err(|e| ModelError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(game)
    }

    /// Write the project file as pretty-printed JSON.
    ///
    /// Uses atomic write (write-to-temp-then-rename) so a failed write
    /// never leaves a truncated project file behind.
    ///
    /// # Errors
    /// Returns an error if serialization fails or the file cannot be
    /// written.
    pub fn write_to(&self, path: &Path) -> Result<(), ModelError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ModelError::Serialize { source: e })?;
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &content).map_err(|e| ModelError::Write {
            path: tmp_path.display().to_string(),
            source: e,
        })?;
        std::fs::rename(&tmp_path, path).map_err(|e| ModelError::Write {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{Area, Environment};
    use crate::scenario::{Level, World};

    fn sample_game() -> Game {
        let mut game = Game::new("smb");
        game.atlas
            .add_all([
                Area {
                    environment: Environment::Overworld,
                    geography: Area::end_zone(0),
                    ..Area::new("Area_25")
                },
                Area {
                    environment: Environment::Castle,
                    ..Area::new("Area_60")
                },
            ])
            .unwrap_or_else(|e| panic!("{e}"));
        game.scenario.worlds.push(World {
            levels: vec![Level::new("Area_25"), Level::new("Area_60")],
            hidden_1up_cost: 10,
        });
        game
    }

    #[test]
    fn project_file_round_trip() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("game.json");
        let game = sample_game();
        game.write_to(&path).unwrap_or_else(|e| panic!("{e}"));
        let reparsed = Game::from_path(&path).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(game, reparsed);
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("game.json");
        sample_game()
            .write_to(&path)
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let result = Game::from_path(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ModelError::Read { .. })));
    }

    #[test]
    fn duplicate_area_ids_fail_to_parse() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("game.json");
        let game = sample_game();
        // Force a duplicate id past the atlas API via raw JSON.
        let mut value = serde_json::to_value(&game).unwrap_or_else(|e| panic!("{e}"));
        let areas = value
            .get_mut("atlas")
            .and_then(serde_json::Value::as_array_mut)
            .unwrap_or_else(|| panic!("atlas is not an array"));
        let first = areas.first().cloned().unwrap_or_else(|| panic!("no areas"));
        areas.push(first);
        std::fs::write(&path, value.to_string()).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            Game::from_path(&path),
            Err(ModelError::Parse { .. })
        ));
    }
}
