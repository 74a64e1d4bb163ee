//! The two-byte area header that prefixes every geography stream.
//!
//! The header sets the defaults for how an area is rendered: timer, start
//! position, background, scenery, platform style and terrain fill. The
//! background and fill/scenery values are shared with the mid-area modifier
//! commands, so their opcodes live here.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Terrain fill style, describing the layers of blocks generated to fill
/// the playable screen. Names follow floor/gap/layer/ceiling block counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    /// No fill; empty.
    None,
    /// Two floor blocks.
    Floor2,
    /// Two floor blocks, one ceiling block.
    Floor2Ceiling1,
    Floor2Ceiling3,
    Floor2Ceiling4,
    Floor2Ceiling8,
    Floor5Ceiling1,
    Floor5Ceiling3,
    Floor5Ceiling4,
    Floor6Ceiling1,
    /// One ceiling block, no floor.
    Ceiling1,
    Floor6Ceiling4,
    Floor9Ceiling1,
    /// Two floor, three-block gap, five-block layer, two-block gap, one ceiling.
    Floor2Gap3Layer5Gap2Ceiling1,
    /// Two floor, three-block gap, four-block layer, three-block gap, one ceiling.
    Floor2Gap3Layer4Gap3Ceiling1,
    /// The whole screen is filled.
    All,
}

impl Fill {
    /// The 4-bit opcode used in headers and fill/scenery modifiers.
    pub fn opcode(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Floor2 => 1,
            Self::Floor2Ceiling1 => 2,
            Self::Floor2Ceiling3 => 3,
            Self::Floor2Ceiling4 => 4,
            Self::Floor2Ceiling8 => 5,
            Self::Floor5Ceiling1 => 6,
            Self::Floor5Ceiling3 => 7,
            Self::Floor5Ceiling4 => 8,
            Self::Floor6Ceiling1 => 9,
            Self::Ceiling1 => 10,
            Self::Floor6Ceiling4 => 11,
            Self::Floor9Ceiling1 => 12,
            Self::Floor2Gap3Layer5Gap2Ceiling1 => 13,
            Self::Floor2Gap3Layer4Gap3Ceiling1 => 14,
            Self::All => 15,
        }
    }

    /// Decode a fill from its opcode. Only the low 4 bits are read.
    pub fn from_opcode(opcode: u8) -> Self {
        match opcode & 0x0F {
            0 => Self::None,
            1 => Self::Floor2,
            2 => Self::Floor2Ceiling1,
            3 => Self::Floor2Ceiling3,
            4 => Self::Floor2Ceiling4,
            5 => Self::Floor2Ceiling8,
            6 => Self::Floor5Ceiling1,
            7 => Self::Floor5Ceiling3,
            8 => Self::Floor5Ceiling4,
            9 => Self::Floor6Ceiling1,
            10 => Self::Ceiling1,
            11 => Self::Floor6Ceiling4,
            12 => Self::Floor9Ceiling1,
            13 => Self::Floor2Gap3Layer5Gap2Ceiling1,
            14 => Self::Floor2Gap3Layer4Gap3Ceiling1,
            _ => Self::All,
        }
    }
}

/// Where the player is spawned on entering the area. Autowalk is a separate
/// header bit; only the four encodable positions are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPosition {
    /// Used by the game engine only.
    FallInternal,
    /// The player falls from above the top of the screen.
    Fall,
    /// Two blocks from the bottom of the screen.
    Bottom,
    /// The middle of the screen.
    Middle,
}

impl StartPosition {
    pub fn opcode(self) -> u8 {
        match self {
            Self::FallInternal => 0,
            Self::Fall => 1,
            Self::Bottom => 2,
            Self::Middle => 3,
        }
    }

    /// Decode a start position from its opcode. Only the low 2 bits are read.
    pub fn from_opcode(opcode: u8) -> Self {
        match opcode & 0b11 {
            0 => Self::FallInternal,
            1 => Self::Fall,
            2 => Self::Bottom,
            _ => Self::Middle,
        }
    }
}

/// Style of non-interactive scenery in the background layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenery {
    None,
    Clouds,
    /// Clouds, hills and trees.
    Hills,
    /// Clouds, fences and trees.
    Fences,
}

impl Scenery {
    pub fn opcode(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Clouds => 1,
            Self::Hills => 2,
            Self::Fences => 3,
        }
    }

    /// Decode a scenery style from its opcode. Only the low 2 bits are read.
    pub fn from_opcode(opcode: u8) -> Self {
        match opcode & 0b11 {
            0 => Self::None,
            1 => Self::Clouds,
            2 => Self::Hills,
            _ => Self::Fences,
        }
    }
}

/// Style in which extensible platforms are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Tree,
    /// Giant mushrooms.
    Mushroom,
    /// Bullet Bill cannons.
    Cannon,
    /// Cloud area; falling off the bottom is an exit, not a death.
    Cloud,
}

impl Platform {
    pub fn opcode(self) -> u8 {
        match self {
            Self::Tree => 0,
            Self::Mushroom => 1,
            Self::Cannon => 2,
            Self::Cloud => 3,
        }
    }

    /// Decode a platform style from its opcode. Only the low 2 bits are read.
    pub fn from_opcode(opcode: u8) -> Self {
        match opcode & 0b11 {
            0 => Self::Tree,
            1 => Self::Mushroom,
            2 => Self::Cannon,
            _ => Self::Cloud,
        }
    }
}

/// Background style, influencing the background colour and scenery palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    None,
    /// The sea fills the background.
    Underwater,
    CastleWall,
    /// Water or lava shows where there is no floor.
    OverWater,
    Night,
    DaySnow,
    NightSnow,
    /// Colour drained from the world, as in 6-3.
    Monochrome,
}

impl Background {
    pub fn opcode(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Underwater => 1,
            Self::CastleWall => 2,
            Self::OverWater => 3,
            Self::Night => 4,
            Self::DaySnow => 5,
            Self::NightSnow => 6,
            Self::Monochrome => 7,
        }
    }

    /// Decode a background from its opcode. Only the low 3 bits are read.
    pub fn from_opcode(opcode: u8) -> Self {
        match opcode & 0b111 {
            0 => Self::None,
            1 => Self::Underwater,
            2 => Self::CastleWall,
            3 => Self::OverWater,
            4 => Self::Night,
            5 => Self::DaySnow,
            6 => Self::NightSnow,
            _ => Self::Monochrome,
        }
    }
}

/// The timer index values the low byte can carry, in bit order 0..=3.
const TICK_VALUES: [u16; 4] = [0, 400, 300, 200];

/// An area header: the default rendering settings for an area.
///
/// Low byte layout: timer index (bits 7-6), autowalk (5), start position
/// (4-3), background (2-0). High byte: platform (7-6), scenery (5-4),
/// fill (3-0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaHeader {
    /// Initial timer value: 0, 400, 300 or 200 ticks.
    pub ticks: u16,
    /// Whether the player walks forward without input on entry.
    pub autowalk: bool,
    pub start_position: StartPosition,
    pub background: Background,
    pub scenery: Scenery,
    pub platform: Platform,
    pub fill: Fill,
}

impl Default for AreaHeader {
    /// 400 ticks, no autowalk, bottom start, no background, tree platforms,
    /// hills scenery and a two-block floor with no ceiling.
    fn default() -> Self {
        Self {
            ticks: 400,
            autowalk: false,
            start_position: StartPosition::Bottom,
            background: Background::None,
            scenery: Scenery::Hills,
            platform: Platform::Tree,
            fill: Fill::Floor2,
        }
    }
}

impl AreaHeader {
    /// Decode a header from its two bytes as stored in geography data.
    /// Every bit pattern decodes, so this cannot fail.
    pub fn parse(low: u8, high: u8) -> Self {
        let ticks_index = usize::from(low >> 6);
        Self {
            ticks: TICK_VALUES.get(ticks_index).copied().unwrap_or(400),
            autowalk: (low >> 5) & 1 == 1,
            start_position: StartPosition::from_opcode(low >> 3),
            background: Background::from_opcode(low),
            platform: Platform::from_opcode(high >> 6),
            scenery: Scenery::from_opcode(high >> 4),
            fill: Fill::from_opcode(high),
        }
    }

    /// Encode the header to the two bytes the game engine reads.
    ///
    /// A `ticks` value outside the encodable set falls back to 400, the
    /// same way the original engine data defaults.
    pub fn unparse(&self) -> [u8; 2] {
        let ticks_bits: u8 = match self.ticks {
            0 => 0b00,
            300 => 0b10,
            200 => 0b11,
            _ => 0b01,
        };
        let low = (ticks_bits << 6)
            | (u8::from(self.autowalk) << 5)
            | (self.start_position.opcode() << 3)
            | self.background.opcode();
        let high =
            (self.platform.opcode() << 6) | (self.scenery.opcode() << 4) | self.fill.opcode();
        [low, high]
    }

    /// Set the initial timer value, validating it against the encodable set.
    ///
    /// # Errors
    /// Returns an error unless `ticks` is 0, 400, 300 or 200.
    pub fn set_ticks(&mut self, ticks: u16) -> Result<(), ModelError> {
        if !TICK_VALUES.contains(&ticks) {
            return Err(ModelError::InvalidTicks { ticks });
        }
        self.ticks = ticks;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(
        header: &AreaHeader,
        ticks: u16,
        autowalk: bool,
        start: StartPosition,
        background: Background,
        platform: Platform,
        scenery: Scenery,
        fill: Fill,
    ) {
        assert_eq!(ticks, header.ticks);
        assert_eq!(autowalk, header.autowalk);
        assert_eq!(start, header.start_position);
        assert_eq!(background, header.background);
        assert_eq!(platform, header.platform);
        assert_eq!(scenery, header.scenery);
        assert_eq!(fill, header.fill);
    }

    #[test]
    fn world_1_1_header() {
        check(
            &AreaHeader::parse(0x50, 0x21),
            400,
            false,
            StartPosition::Bottom,
            Background::None,
            Platform::Tree,
            Scenery::Hills,
            Fill::Floor2,
        );
    }

    #[test]
    fn world_1_2_header() {
        check(
            &AreaHeader::parse(0x48, 0x0F),
            400,
            false,
            StartPosition::Fall,
            Background::None,
            Platform::Tree,
            Scenery::None,
            Fill::All,
        );
    }

    #[test]
    fn world_1_3_header() {
        check(
            &AreaHeader::parse(0x90, 0x11),
            300,
            false,
            StartPosition::Bottom,
            Background::None,
            Platform::Tree,
            Scenery::Clouds,
            Fill::Floor2,
        );
    }

    #[test]
    fn world_1_4_header() {
        check(
            &AreaHeader::parse(0x9B, 0x07),
            300,
            false,
            StartPosition::Middle,
            Background::OverWater,
            Platform::Tree,
            Scenery::None,
            Fill::Floor5Ceiling3,
        );
    }

    #[test]
    fn original_headers_round_trip() {
        // Header bytes from the original game, 1-1 through the pipe
        // transition scene.
        let headers: [[u8; 2]; 15] = [
            [0x50, 0x21],
            [0x48, 0x0F],
            [0x90, 0x11],
            [0x9B, 0x07],
            [0x52, 0x31],
            [0x41, 0x01],
            [0x90, 0x11],
            [0x52, 0x31],
            [0x96, 0x31],
            [0x94, 0x11],
            [0x52, 0x21],
            [0x10, 0x51],
            [0x90, 0x51],
            [0x5B, 0x07],
            [0x38, 0x11],
        ];
        for [low, high] in headers {
            let header = AreaHeader::parse(low, high);
            assert_eq!([low, high], header.unparse(), "header {low:02x} {high:02x}");
        }
    }

    #[test]
    fn scenery_bits() {
        for (bits, scenery) in [
            (0b00, Scenery::None),
            (0b01, Scenery::Clouds),
            (0b10, Scenery::Hills),
            (0b11, Scenery::Fences),
        ] {
            let header = AreaHeader {
                scenery,
                ..AreaHeader::default()
            };
            let bytes = header.unparse();
            assert_eq!(bits, (bytes[1] & 0b0011_0000) >> 4);
        }
    }

    #[test]
    fn ticks_validation() {
        let mut header = AreaHeader::default();
        for ticks in [0, 400, 300, 200] {
            header.set_ticks(ticks).unwrap_or_else(|e| panic!("{e}"));
            assert_eq!(ticks, header.ticks);
        }
        assert!(header.set_ticks(100).is_err());
        assert!(matches!(
            header.set_ticks(999),
            Err(ModelError::InvalidTicks { ticks: 999 })
        ));
    }

    #[test]
    fn unencodable_ticks_fall_back_to_400() {
        let header = AreaHeader {
            ticks: 123,
            ..AreaHeader::default()
        };
        assert_eq!(0b01, header.unparse()[0] >> 6);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_header_word_round_trips(low: u8, high: u8) {
                let header = AreaHeader::parse(low, high);
                prop_assert_eq!([low, high], header.unparse());
            }
        }
    }
}
