//! A single game area: one geography stream and one population stream
//! under a header, tagged with the environment that selects its tileset.

use serde::{Deserialize, Serialize};

use crate::geography::{CastleSize, Geography};
use crate::header::AreaHeader;
use crate::population::Population;

/// The environment an area belongs to. The ordinal selects the tileset
/// and forms the high bits of the area's atlas index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Underwater,
    Overworld,
    Underground,
    Castle,
}

impl Environment {
    pub fn id(self) -> u8 {
        match self {
            Self::Underwater => 0,
            Self::Overworld => 1,
            Self::Underground => 2,
            Self::Castle => 3,
        }
    }

    /// Decode an environment id. Only the low 2 bits are read.
    pub fn from_id(id: u8) -> Self {
        match id & 0b11 {
            0 => Self::Underwater,
            1 => Self::Overworld,
            2 => Self::Underground,
            _ => Self::Castle,
        }
    }

    /// All environments in id order, the order areas are stored in-game.
    pub const ALL: [Self; 4] = [
        Self::Underwater,
        Self::Overworld,
        Self::Underground,
        Self::Castle,
    ];
}

/// An area: header plus geography and population actor lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Unique id, used by exit pointers and scenario levels.
    pub id: String,
    /// Free-form human-readable name.
    #[serde(default)]
    pub familiar_name: String,
    pub environment: Environment,
    pub header: AreaHeader,
    pub geography: Vec<Geography>,
    pub population: Vec<Population>,
}

impl Area {
    /// An empty overworld area with a default header.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            familiar_name: String::new(),
            environment: Environment::Overworld,
            header: AreaHeader::default(),
            geography: Vec::new(),
            population: Vec::new(),
        }
    }

    /// The standard level-ending geography: an exit pipe, the staircase,
    /// the flagpole and a small castle, positioned as in the original game's
    /// above-ground levels.
    pub fn end_zone(x: u32) -> Vec<Geography> {
        vec![
            Geography::UprightPipe {
                x: x + 3,
                y: 9,
                extent: 1,
                enterable: false,
            },
            Geography::Staircase {
                x: x + 5,
                extent: 8,
            },
            Geography::FixedStatic {
                x: x + 21,
                object: crate::geography::FixedStaticKind::Flagpole,
            },
            Geography::Castle {
                x: x + 25,
                size: CastleSize::Small,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_ids_round_trip() {
        for environment in Environment::ALL {
            assert_eq!(environment, Environment::from_id(environment.id()));
        }
    }

    #[test]
    fn environments_order_by_id() {
        let mut environments = [
            Environment::Castle,
            Environment::Underwater,
            Environment::Underground,
            Environment::Overworld,
        ];
        environments.sort();
        assert_eq!(Environment::ALL, environments);
    }

    #[test]
    fn end_zone_is_positioned_relative_to_its_origin() {
        let zone = Area::end_zone(100);
        let xs: Vec<u32> = zone.iter().map(Geography::x).collect();
        assert_eq!(vec![103, 105, 121, 125], xs);
        assert!(matches!(
            zone.last(),
            Some(Geography::Castle {
                size: CastleSize::Small,
                ..
            })
        ));
    }

    #[test]
    fn new_area_is_empty() {
        let area = Area::new("Area_00");
        assert_eq!("Area_00", area.id);
        assert_eq!(Environment::Overworld, area.environment);
        assert!(area.geography.is_empty());
        assert!(area.population.is_empty());
    }
}
