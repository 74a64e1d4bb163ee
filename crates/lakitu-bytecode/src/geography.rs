//! The geography stream: a two-byte header, then two-byte terrain
//! commands, closed by the `0xFD` sentinel.
//!
//! First command byte: page-relative X in the high nibble, a Y
//! coordinate or a command selector (0xC..=0xF) in the low nibble.
//! Second byte: the new-page flag in bit 7, then type and parameter bits
//! depending on the selector.

use lakitu_model::geography::{
    CastleSize, ColumnKind, FixedExtensibleKind, FixedStaticKind, Geography, RowKind,
    SingletonKind,
};
use lakitu_model::header::{AreaHeader, Background, Fill, Scenery};

use crate::command::{relative_x, PageStep, PageWalker, NEW_PAGE_FLAG, PAGE_WIDTH};
use crate::error::BytecodeError;
use crate::reader::Reader;

/// Sentinel closing a geography stream.
pub const GEOGRAPHY_END: u8 = 0xFD;

/// Parse a complete geography stream, header included.
///
/// # Errors
/// Fails if the stream ends before the sentinel or a command carries an
/// opcode with no model counterpart.
pub fn parse_geography(bytes: &[u8]) -> Result<(AreaHeader, Vec<Geography>), BytecodeError> {
    let mut reader = Reader::new(bytes);
    let low = reader.next()?;
    let high = reader.next()?;
    let header = AreaHeader::parse(low, high);

    let mut page: u32 = 0;
    let mut actors = Vec::new();
    loop {
        let first = reader.next()?;
        if first == GEOGRAPHY_END {
            break;
        }
        let flag_offset = reader.offset();
        let second = reader.next()?;
        if second & NEW_PAGE_FLAG != 0 {
            page += 1;
        }
        let y = first & 0x0F;
        // Page set: selector 0xD with bit 6 clear. Carries no actor.
        if y == 0xD && second & 0x40 == 0 {
            page = u32::from(second & 0x3F);
            continue;
        }
        let x = u32::from(first >> 4) + page * PAGE_WIDTH;
        actors.push(decode(x, y, second, flag_offset)?);
    }
    Ok((header, actors))
}

fn decode(x: u32, y: u8, second: u8, offset: usize) -> Result<Geography, BytecodeError> {
    let param = second & 0x0F;
    let kind_bits = (second >> 4) & 0b111;
    let actor = match y {
        0x0..=0xB => match kind_bits {
            0b000 => Geography::SingletonObject {
                x,
                y,
                object: SingletonKind::from_opcode(param)
                    .ok_or(BytecodeError::UnknownGeographyOpcode {
                        byte: second,
                        offset,
                    })?,
            },
            0b001 => Geography::ExtensiblePlatform { x, y, extent: param },
            0b010 => Geography::Row {
                x,
                y,
                extent: param,
                material: RowKind::Brick,
            },
            0b011 => Geography::Row {
                x,
                y,
                extent: param,
                material: RowKind::Block,
            },
            0b100 => Geography::Row {
                x,
                y,
                extent: param,
                material: RowKind::Coin,
            },
            0b101 => Geography::Column {
                x,
                y,
                extent: param,
                material: ColumnKind::Brick,
            },
            0b110 => Geography::Column {
                x,
                y,
                extent: param,
                material: ColumnKind::Block,
            },
            _ => Geography::UprightPipe {
                x,
                y,
                extent: param & 0b111,
                enterable: param & 0b1000 != 0,
            },
        },
        0xC => Geography::FixedExtensible {
            x,
            extent: param,
            object: FixedExtensibleKind::from_opcode(kind_bits),
        },
        0xD => Geography::FixedStatic {
            x,
            object: FixedStaticKind::from_opcode(param).ok_or(
                BytecodeError::UnknownGeographyOpcode {
                    byte: second,
                    offset,
                },
            )?,
        },
        0xE => {
            if second & 0x40 != 0 {
                Geography::BackgroundModifier {
                    x,
                    background: Background::from_opcode(second),
                }
            } else {
                Geography::FillSceneryModifier {
                    x,
                    scenery: Scenery::from_opcode(second >> 4),
                    fill: Fill::from_opcode(second),
                }
            }
        }
        _ => match kind_bits {
            0b000 => Geography::FullHeightRope { x },
            0b001 => Geography::ScaleRopeVertical { x, extent: param },
            0b010 => Geography::Castle {
                x,
                size: if param == 0 {
                    CastleSize::Large
                } else {
                    CastleSize::Small
                },
            },
            0b011 => Geography::Staircase { x, extent: param },
            0b100 => Geography::AnglePipe { x, y: param },
            _ => {
                return Err(BytecodeError::UnknownGeographyOpcode {
                    byte: second,
                    offset,
                })
            }
        },
    };
    Ok(actor)
}

/// Unparse a header and actor list back to a geography stream.
///
/// Actors are emitted in X order; page flags and page-set commands are
/// synthesized as needed. Encoding cannot fail: every model value has a
/// byte representation.
pub fn unparse_geography(header: &AreaHeader, actors: &[Geography]) -> Vec<u8> {
    let mut sorted: Vec<&Geography> = actors.iter().collect();
    sorted.sort_by_key(|a| a.x());

    let mut out = header.unparse().to_vec();
    let mut walker = PageWalker::new();
    for actor in sorted {
        let flag = match walker.step_to(actor.x()) {
            PageStep::Stay => 0,
            PageStep::Advance => NEW_PAGE_FLAG,
            PageStep::Jump(target) => {
                out.push(0x0D);
                out.push(target);
                0
            }
        };
        let [first, second] = encode(actor, flag);
        out.push(first);
        out.push(second);
    }
    out.push(GEOGRAPHY_END);
    out
}

fn encode(actor: &Geography, flag: u8) -> [u8; 2] {
    let first = |y: u8| (relative_x(actor.x()) << 4) | (y & 0x0F);
    match *actor {
        Geography::SingletonObject { y, object, .. } => [first(y), flag | object.opcode()],
        Geography::ExtensiblePlatform { y, extent, .. } => {
            [first(y), flag | 0b001_0000 | (extent & 0x0F)]
        }
        Geography::Row {
            y,
            extent,
            material,
            ..
        } => [first(y), flag | (material.opcode() << 4) | (extent & 0x0F)],
        Geography::Column {
            y,
            extent,
            material,
            ..
        } => [first(y), flag | (material.opcode() << 4) | (extent & 0x0F)],
        Geography::UprightPipe {
            y,
            extent,
            enterable,
            ..
        } => [
            first(y),
            flag | 0b111_0000 | (u8::from(enterable) << 3) | (extent & 0b111),
        ],
        Geography::FixedExtensible { extent, object, .. } => {
            [first(0xC), flag | (object.opcode() << 4) | (extent & 0x0F)]
        }
        Geography::FixedStatic { object, .. } => [first(0xD), flag | 0x40 | object.opcode()],
        Geography::FullHeightRope { .. } => [first(0xF), flag],
        Geography::ScaleRopeVertical { extent, .. } => {
            [first(0xF), flag | 0b001_0000 | (extent & 0x0F)]
        }
        Geography::Castle { size, .. } => {
            let param = match size {
                CastleSize::Large => 0,
                CastleSize::Small => 6,
            };
            [first(0xF), flag | 0b010_0000 | param]
        }
        Geography::Staircase { extent, .. } => [first(0xF), flag | 0b011_0000 | (extent & 0x0F)],
        Geography::AnglePipe { y, .. } => [first(0xF), flag | 0b100_0000 | (y & 0x0F)],
        Geography::BackgroundModifier { background, .. } => {
            [first(0xE), flag | 0x40 | background.opcode()]
        }
        Geography::FillSceneryModifier { fill, scenery, .. } => {
            [first(0xE), flag | (scenery.opcode() << 4) | fill.opcode()]
        }
    }
}
