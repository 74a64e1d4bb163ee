//! The population stream: sprite commands closed by the `0xFF` sentinel.
//!
//! Characters are two bytes. Exit pointers use the reserved Y selector
//! 0xE and take a third byte; page sets use selector 0xF. The new-page
//! flag always sits on the second byte, which for exit pointers is the
//! middle one.

use lakitu_model::atlas::Atlas;
use lakitu_model::population::{CharacterKind, Population};

use crate::command::{relative_x, PageStep, PageWalker, NEW_PAGE_FLAG, PAGE_WIDTH};
use crate::error::BytecodeError;
use crate::reader::Reader;

/// Sentinel closing a population stream.
pub const POPULATION_END: u8 = 0xFF;

/// Parse a complete population stream.
///
/// Exit pointer destinations are named `Area_<index>` after the 7-bit
/// area index they carry; callers resolve them against an atlas.
///
/// # Errors
/// Fails if the stream ends before the sentinel or a character opcode is
/// not in the table.
pub fn parse_population(bytes: &[u8]) -> Result<Vec<Population>, BytecodeError> {
    let mut reader = Reader::new(bytes);
    let mut page: u32 = 0;
    let mut actors = Vec::new();
    loop {
        let first = reader.next()?;
        if first == POPULATION_END {
            break;
        }
        let flag_offset = reader.offset();
        let second = reader.next()?;
        if second & NEW_PAGE_FLAG != 0 {
            page += 1;
        }
        let y = first & 0x0F;
        if y == 0xF {
            page = u32::from(second & 0x3F);
            continue;
        }
        let x = u32::from(first >> 4) + page * PAGE_WIDTH;
        if y == 0xE {
            let third = reader.next()?;
            actors.push(Population::ExitPointer {
                x,
                destination: format!("Area_{:02X}", second & 0x7F),
                active_from_world: third >> 5,
                start_page: third & 0x0F,
            });
        } else {
            let opcode = second & 0x3F;
            let character =
                CharacterKind::from_opcode(opcode).ok_or(BytecodeError::UnknownCharacter {
                    opcode,
                    offset: flag_offset,
                })?;
            actors.push(Population::Character {
                x,
                y,
                character,
                hard_mode_only: second & 0x40 != 0,
            });
        }
    }
    Ok(actors)
}

/// Unparse an actor list back to a population stream, resolving exit
/// pointer destinations through the atlas.
///
/// # Errors
/// Fails if an exit pointer names an area the atlas does not contain.
pub fn unparse_population(actors: &[Population], atlas: &Atlas) -> Result<Vec<u8>, BytecodeError> {
    let mut sorted: Vec<&Population> = actors.iter().collect();
    sorted.sort_by_key(|a| a.x());

    let mut out = Vec::new();
    let mut walker = PageWalker::new();
    for actor in sorted {
        let flag = match walker.step_to(actor.x()) {
            PageStep::Stay => 0,
            PageStep::Advance => NEW_PAGE_FLAG,
            PageStep::Jump(target) => {
                out.push(0x0F);
                out.push(target);
                0
            }
        };
        match actor {
            Population::Character {
                x,
                y,
                character,
                hard_mode_only,
            } => {
                out.push((relative_x(*x) << 4) | (y & 0x0F));
                out.push(flag | (u8::from(*hard_mode_only) << 6) | character.opcode());
            }
            Population::ExitPointer {
                x,
                destination,
                active_from_world,
                start_page,
            } => {
                let index =
                    atlas
                        .index_of(destination)
                        .ok_or_else(|| BytecodeError::UnknownDestination {
                            id: destination.clone(),
                        })?;
                out.push((relative_x(*x) << 4) | 0x0E);
                out.push(flag | (index & 0x7F));
                out.push(((active_from_world & 0b111) << 5) | (start_page & 0x0F));
            }
        }
    }
    out.push(POPULATION_END);
    Ok(out)
}
