//! Geography actors: the static objects, platforms and scenery modifiers
//! that make up an area's terrain.
//!
//! All X coordinates are absolute block counts from the start of the area;
//! page arithmetic belongs to the bytecode codec, not the model.

use serde::{Deserialize, Serialize};

use crate::header::{Background, Fill, Scenery};

/// A one-block static object placed at a free X/Y position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingletonKind {
    QuestionBlockPowerup,
    QuestionBlockCoin,
    HiddenBlockCoin,
    HiddenBlockOneUp,
    BrickPowerup,
    BrickVine,
    BrickStar,
    BrickMultiCoin,
    BrickOneUp,
    SidewaysPipe,
    UsedBlock,
    JumpingBoard,
}

impl SingletonKind {
    pub fn opcode(self) -> u8 {
        match self {
            Self::QuestionBlockPowerup => 0x0,
            Self::QuestionBlockCoin => 0x1,
            Self::HiddenBlockCoin => 0x2,
            Self::HiddenBlockOneUp => 0x3,
            Self::BrickPowerup => 0x4,
            Self::BrickVine => 0x5,
            Self::BrickStar => 0x6,
            Self::BrickMultiCoin => 0x7,
            Self::BrickOneUp => 0x8,
            Self::SidewaysPipe => 0x9,
            Self::UsedBlock => 0xA,
            Self::JumpingBoard => 0xB,
        }
    }

    /// Decode a singleton object id. Ids 0xC and up are engine-internal
    /// and have no model counterpart.
    pub fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode {
            0x0 => Some(Self::QuestionBlockPowerup),
            0x1 => Some(Self::QuestionBlockCoin),
            0x2 => Some(Self::HiddenBlockCoin),
            0x3 => Some(Self::HiddenBlockOneUp),
            0x4 => Some(Self::BrickPowerup),
            0x5 => Some(Self::BrickVine),
            0x6 => Some(Self::BrickStar),
            0x7 => Some(Self::BrickMultiCoin),
            0x8 => Some(Self::BrickOneUp),
            0x9 => Some(Self::SidewaysPipe),
            0xA => Some(Self::UsedBlock),
            0xB => Some(Self::JumpingBoard),
            _ => None,
        }
    }
}

/// Material of a horizontal row of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Brick,
    Block,
    Coin,
}

impl RowKind {
    /// The 3-bit type field value for this row material.
    pub fn opcode(self) -> u8 {
        match self {
            Self::Brick => 0b010,
            Self::Block => 0b011,
            Self::Coin => 0b100,
        }
    }
}

/// Material of a vertical column of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Brick,
    Block,
}

impl ColumnKind {
    /// The 3-bit type field value for this column material.
    pub fn opcode(self) -> u8 {
        match self {
            Self::Brick => 0b101,
            Self::Block => 0b110,
        }
    }
}

/// Extensible objects whose Y position is fixed by the game engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedExtensibleKind {
    /// A hole in the floor.
    Hole,
    ScaleRopeHorizontal,
    BridgeY7,
    BridgeY8,
    BridgeY10,
    /// A hole in the floor with water at the bottom.
    WaterHole,
    QuestionBlockRowY3,
    QuestionBlockRowY7,
}

impl FixedExtensibleKind {
    pub fn opcode(self) -> u8 {
        match self {
            Self::Hole => 0,
            Self::ScaleRopeHorizontal => 1,
            Self::BridgeY7 => 2,
            Self::BridgeY8 => 3,
            Self::BridgeY10 => 4,
            Self::WaterHole => 5,
            Self::QuestionBlockRowY3 => 6,
            Self::QuestionBlockRowY7 => 7,
        }
    }

    /// Decode a fixed-extensible type. Only the low 3 bits are read.
    pub fn from_opcode(opcode: u8) -> Self {
        match opcode & 0b111 {
            0 => Self::Hole,
            1 => Self::ScaleRopeHorizontal,
            2 => Self::BridgeY7,
            3 => Self::BridgeY8,
            4 => Self::BridgeY10,
            5 => Self::WaterHole,
            6 => Self::QuestionBlockRowY3,
            _ => Self::QuestionBlockRowY7,
        }
    }
}

/// Objects with a position fixed by the game engine in both axes, plus
/// command-like actors (scroll locks, generators, the loop command).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedStaticKind {
    /// A sideways-T pipe, as in the underwater section of 8-4.
    TeePipe,
    Flagpole,
    Axe,
    /// The chain holding up Bowser's bridge.
    Chain,
    BowserBridge,
    /// Stops scrolling; the area works as a warp zone.
    WarpScrollLock,
    ScrollLock,
    InfiniteFlyingCheepGenerator,
    InfiniteBulletBillGenerator,
    StopInfiniteGenerator,
    /// The screen-loop command used by maze castles.
    Loop,
}

impl FixedStaticKind {
    pub fn opcode(self) -> u8 {
        match self {
            Self::TeePipe => 0x0,
            Self::Flagpole => 0x1,
            Self::Axe => 0x2,
            Self::Chain => 0x3,
            Self::BowserBridge => 0x4,
            Self::WarpScrollLock => 0x5,
            Self::ScrollLock => 0x6,
            Self::InfiniteFlyingCheepGenerator => 0x7,
            Self::InfiniteBulletBillGenerator => 0x8,
            Self::StopInfiniteGenerator => 0x9,
            Self::Loop => 0xA,
        }
    }

    pub fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode {
            0x0 => Some(Self::TeePipe),
            0x1 => Some(Self::Flagpole),
            0x2 => Some(Self::Axe),
            0x3 => Some(Self::Chain),
            0x4 => Some(Self::BowserBridge),
            0x5 => Some(Self::WarpScrollLock),
            0x6 => Some(Self::ScrollLock),
            0x7 => Some(Self::InfiniteFlyingCheepGenerator),
            0x8 => Some(Self::InfiniteBulletBillGenerator),
            0x9 => Some(Self::StopInfiniteGenerator),
            0xA => Some(Self::Loop),
            _ => None,
        }
    }
}

/// Size of an end-of-level castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastleSize {
    Small,
    Large,
}

/// A geography actor. X coordinates are absolute; Y and extents are the
/// raw nibble values the game engine interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "actor", rename_all = "snake_case")]
pub enum Geography {
    SingletonObject {
        x: u32,
        y: u8,
        object: SingletonKind,
    },
    Row {
        x: u32,
        y: u8,
        extent: u8,
        material: RowKind,
    },
    Column {
        x: u32,
        y: u8,
        extent: u8,
        material: ColumnKind,
    },
    UprightPipe {
        x: u32,
        y: u8,
        extent: u8,
        enterable: bool,
    },
    ExtensiblePlatform {
        x: u32,
        y: u8,
        extent: u8,
    },
    FixedExtensible {
        x: u32,
        extent: u8,
        object: FixedExtensibleKind,
    },
    FixedStatic {
        x: u32,
        object: FixedStaticKind,
    },
    FullHeightRope {
        x: u32,
    },
    ScaleRopeVertical {
        x: u32,
        extent: u8,
    },
    Castle {
        x: u32,
        size: CastleSize,
    },
    Staircase {
        x: u32,
        extent: u8,
    },
    AnglePipe {
        x: u32,
        y: u8,
    },
    /// Changes the background style from this X onward.
    BackgroundModifier {
        x: u32,
        background: Background,
    },
    /// Changes the terrain fill and scenery from this X onward.
    FillSceneryModifier {
        x: u32,
        fill: Fill,
        scenery: Scenery,
    },
}

impl Geography {
    /// The actor's absolute X coordinate in blocks.
    pub fn x(&self) -> u32 {
        match *self {
            Self::SingletonObject { x, .. }
            | Self::Row { x, .. }
            | Self::Column { x, .. }
            | Self::UprightPipe { x, .. }
            | Self::ExtensiblePlatform { x, .. }
            | Self::FixedExtensible { x, .. }
            | Self::FixedStatic { x, .. }
            | Self::FullHeightRope { x }
            | Self::ScaleRopeVertical { x, .. }
            | Self::Castle { x, .. }
            | Self::Staircase { x, .. }
            | Self::AnglePipe { x, .. }
            | Self::BackgroundModifier { x, .. }
            | Self::FillSceneryModifier { x, .. } => x,
        }
    }
}
