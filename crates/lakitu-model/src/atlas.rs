//! The atlas: every area in a game, held in the environment order the
//! game image stores them in.
//!
//! An area's *index number* is how the game engine refers to it: the
//! environment id in bits 6-5 and the area's position among its
//! environment's areas in bits 4-0. Exit pointers and the scenario's
//! area-listing tables both use index numbers, so the atlas keeps areas
//! sorted by environment at all times (stable, so insertion order within
//! an environment is preserved).

use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::error::ModelError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Area>", into = "Vec<Area>")]
pub struct Atlas {
    areas: Vec<Area>,
}

impl Atlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an area, keeping environment order.
    ///
    /// # Errors
    /// Fails if an area with the same id is already present.
    pub fn add(&mut self, area: Area) -> Result<(), ModelError> {
        if self.get(&area.id).is_some() {
            return Err(ModelError::DuplicateArea {
                id: area.id.clone(),
            });
        }
        self.areas.push(area);
        self.areas.sort_by_key(|a| a.environment);
        Ok(())
    }

    /// Insert several areas.
    ///
    /// # Errors
    /// Fails on the first duplicate id; earlier areas stay inserted.
    pub fn add_all<I: IntoIterator<Item = Area>>(&mut self, areas: I) -> Result<(), ModelError> {
        for area in areas {
            self.add(area)?;
        }
        Ok(())
    }

    /// Remove and return the area with the given id, if present.
    pub fn remove(&mut self, id: &str) -> Option<Area> {
        let position = self.areas.iter().position(|a| a.id == id)?;
        Some(self.areas.remove(position))
    }

    pub fn get(&self, id: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Area> {
        self.areas.iter_mut().find(|a| a.id == id)
    }

    /// The game-engine index number of the area with the given id.
    pub fn index_of(&self, id: &str) -> Option<u8> {
        let area = self.get(id)?;
        let subindex = self
            .areas
            .iter()
            .filter(|a| a.environment == area.environment)
            .position(|a| a.id == id)?;
        let subindex = u8::try_from(subindex).ok()?;
        Some((area.environment.id() << 5) | subindex)
    }

    /// Areas in environment order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Area> {
        self.areas.iter()
    }

    /// Number of areas in each environment, in environment-id order.
    pub fn environment_counts(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for area in &self.areas {
            if let Some(count) = counts.get_mut(usize::from(area.environment.id())) {
                *count += 1;
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

impl TryFrom<Vec<Area>> for Atlas {
    type Error = ModelError;

    fn try_from(areas: Vec<Area>) -> Result<Self, Self::Error> {
        let mut atlas = Self::new();
        atlas.add_all(areas)?;
        Ok(atlas)
    }
}

impl From<Atlas> for Vec<Area> {
    fn from(atlas: Atlas) -> Self {
        atlas.areas
    }
}

impl<'a> IntoIterator for &'a Atlas {
    type Item = &'a Area;
    type IntoIter = std::slice::Iter<'a, Area>;

    fn into_iter(self) -> Self::IntoIter {
        self.areas.iter()
    }
}
