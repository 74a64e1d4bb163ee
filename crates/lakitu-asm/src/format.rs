//! Rendering the model as labelled `.byte` tables.
//!
//! The table names and shapes follow the conventional Super Mario Bros.
//! disassembly, so the output drops into such a build tree: per-area
//! `G_`/`P_` data blocks, `.lobytes`/`.hibytes` address lists over a
//! `.define`d symbol list, and the scenario's offset, price and halfway
//! tables.

use std::collections::BTreeMap;

use rayon::prelude::*;

use lakitu_bytecode::{unparse_geography, unparse_population};
use lakitu_model::area::Area;
use lakitu_model::atlas::Atlas;
use lakitu_model::scenario::Scenario;
use lakitu_model::{Game, ModelError};

use crate::error::AsmError;

/// Render one labelled `.byte` table. Empty input yields the empty
/// string: an empty table would be a label with no data, which ca65
/// treats as an alias for whatever follows.
pub fn format_bytes(label: &str, bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }
    let list: Vec<String> = bytes.iter().map(|b| format!("${b:02x}")).collect();
    format!("{label}:\n    .byte {}\n", list.join(", "))
}

/// Render the whole game as a bundle of named assembly sources:
/// `geography`, `population` and `scenario`.
///
/// # Errors
/// Fails when a level or exit pointer names an area the atlas does not
/// contain.
pub fn game_tables(game: &Game) -> Result<BTreeMap<String, String>, AsmError> {
    let mut bundle = BTreeMap::new();
    bundle.insert("geography".to_owned(), geography_tables(&game.atlas));
    bundle.insert(
        "population".to_owned(),
        population_tables(&game.atlas)?,
    );
    bundle.insert(
        "scenario".to_owned(),
        scenario_tables(&game.scenario, &game.atlas)?,
    );
    Ok(bundle)
}

/// Per-environment starting positions in the address tables.
fn environment_offsets(atlas: &Atlas) -> [u8; 4] {
    let counts = atlas.environment_counts();
    let mut offsets = [0u8; 4];
    let mut running = 0usize;
    for (slot, count) in offsets.iter_mut().zip(counts) {
        *slot = u8::try_from(running).unwrap_or(0);
        running += count;
    }
    offsets
}

fn data_label(prefix: &str, area: &Area) -> String {
    let safe: String = area
        .id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{prefix}{safe}")
}

fn address_lists(define: &str, low: &str, high: &str, labels: &[String]) -> String {
    format!(
        ".define {define} {}\n\n{low}:\n    .lobytes {define}\n{high}:\n    .hibytes {define}\n",
        labels.join(", ")
    )
}

/// The geography source: environment offsets, address lists and one
/// `G_` data block per area.
pub fn geography_tables(atlas: &Atlas) -> String {
    let labels: Vec<String> = atlas.iter().map(|a| data_label("G_", a)).collect();
    let blocks: Vec<String> = atlas
        .areas()
        .par_iter()
        .map(|area| {
            format_bytes(
                &data_label("G_", area),
                &unparse_geography(&area.header, &area.geography),
            )
        })
        .collect();
    let mut out = format_bytes("AreaDataHOffsets", &environment_offsets(atlas));
    out.push('\n');
    out.push_str(&address_lists(
        "AreaDataAddr",
        "AreaDataAddrLow",
        "AreaDataAddrHigh",
        &labels,
    ));
    out.push('\n');
    out.push_str(&blocks.join("\n"));
    out
}

/// The population source: environment offsets, address lists and one
/// `P_` data block per area.
///
/// # Errors
/// Fails when an exit pointer names an area the atlas does not contain.
pub fn population_tables(atlas: &Atlas) -> Result<String, AsmError> {
    let labels: Vec<String> = atlas.iter().map(|a| data_label("P_", a)).collect();
    let blocks: Vec<String> = atlas
        .areas()
        .par_iter()
        .map(|area| -> Result<String, AsmError> {
            let bytes = unparse_population(&area.population, atlas)?;
            Ok(format_bytes(&data_label("P_", area), &bytes))
        })
        .collect::<Result<_, _>>()?;
    let mut out = format_bytes("EnemyAddrHOffsets", &environment_offsets(atlas));
    out.push('\n');
    out.push_str(&address_lists(
        "EnemyDataAddr",
        "EnemyDataAddrLow",
        "EnemyDataAddrHigh",
        &labels,
    ));
    out.push('\n');
    out.push_str(&blocks.join("\n"));
    Ok(out)
}

/// The scenario source: world offsets into the area listing, the
/// listing itself, hidden 1-up prices and packed halfway nybbles.
///
/// # Errors
/// Fails when a level starts in an area the atlas does not contain.
pub fn scenario_tables(scenario: &Scenario, atlas: &Atlas) -> Result<String, AsmError> {
    let mut world_labels = Vec::new();
    let mut listing = String::from("AreaAddrOffsets:\n");
    for (number, world) in scenario.worlds.iter().enumerate() {
        let label = format!("World{}Areas", number + 1);
        let mut indexes = Vec::new();
        for level in &world.levels {
            let index = atlas
                .index_of(&level.start_area)
                .ok_or_else(|| ModelError::UnknownArea {
                    id: level.start_area.clone(),
                })?;
            indexes.push(index);
        }
        listing.push_str(&format_bytes(&label, &indexes));
        world_labels.push(label);
    }

    let offset_entries: Vec<String> = world_labels
        .iter()
        .map(|label| format!("{label}-AreaAddrOffsets"))
        .collect();
    let costs: Vec<u8> = scenario.worlds.iter().map(|w| w.hidden_1up_cost).collect();

    let mut out = format!(
        "WorldAddrOffsets:\n    .byte {}\n\n",
        offset_entries.join(", ")
    );
    out.push_str(&listing);
    out.push('\n');
    out.push_str(&format_bytes("Hidden1UpCoinAmts", &costs));
    out.push('\n');
    out.push_str(&format_bytes(
        "HalfwayPageNybbles",
        &halfway_nybbles(scenario, atlas),
    ));
    Ok(out)
}

/// Pack each world's halfway checkpoints: four nybbles per world (the
/// engine looks up only levels 1-4), two levels per byte, high nybble
/// first. Autowalk entrances do not occupy a slot.
fn halfway_nybbles(scenario: &Scenario, atlas: &Atlas) -> Vec<u8> {
    let mut packed = Vec::new();
    for world in &scenario.worlds {
        let mut nybbles: Vec<u8> = world
            .levels
            .iter()
            .filter(|level| {
                atlas
                    .get(&level.start_area)
                    .map_or(true, |area| !area.header.autowalk)
            })
            .map(|level| level.checkpoint & 0x0F)
            .take(4)
            .collect();
        nybbles.resize(4, 0);
        for pair in nybbles.chunks(2) {
            let high = pair.first().copied().unwrap_or(0);
            let low = pair.get(1).copied().unwrap_or(0);
            packed.push((high << 4) | low);
        }
    }
    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use lakitu_model::area::Environment;
    use lakitu_model::scenario::{Level, World};

    fn area(id: &str, environment: Environment) -> Area {
        Area {
            environment,
            ..Area::new(id)
        }
    }

    fn sample_atlas() -> Atlas {
        let mut atlas = Atlas::new();
        atlas
            .add_all([
                area("field", Environment::Overworld),
                area("field_2", Environment::Overworld),
                area("cellar", Environment::Underground),
                area("castle", Environment::Castle),
            ])
            .unwrap_or_else(|e| panic!("{e}"));
        atlas
    }

    #[test]
    fn format_bytes_renders_one_labelled_line() {
        assert_eq!(
            "Vals:\n    .byte $56, $78\n",
            format_bytes("Vals", &[0x56, 0x78])
        );
    }

    #[test]
    fn format_bytes_of_nothing_is_nothing() {
        assert_eq!("", format_bytes("Vals", &[]));
    }

    #[test]
    fn world_listing_uses_index_numbers() {
        let scenario = Scenario {
            worlds: vec![World {
                levels: vec![
                    Level::new("field"),
                    Level::new("cellar"),
                    Level::new("field_2"),
                    Level::new("castle"),
                ],
                hidden_1up_cost: 10,
            }],
        };
        let out =
            scenario_tables(&scenario, &sample_atlas()).unwrap_or_else(|e| panic!("{e}"));
        assert!(
            out.contains("World1Areas:\n    .byte $20, $40, $21, $60"),
            "{out}"
        );
        assert!(
            out.contains("WorldAddrOffsets:\n    .byte World1Areas-AreaAddrOffsets\n"),
            "{out}"
        );
    }

    #[test]
    fn hidden_1up_costs_render_in_world_order() {
        let scenario = Scenario {
            worlds: (1u8..=8)
                .map(|w| World {
                    levels: vec![Level::new("field")],
                    hidden_1up_cost: w * 10,
                })
                .collect(),
        };
        let out =
            scenario_tables(&scenario, &sample_atlas()).unwrap_or_else(|e| panic!("{e}"));
        assert!(
            out.contains(
                "Hidden1UpCoinAmts:\n    .byte $0a, $14, $1e, $28, $32, $3c, $46, $50"
            ),
            "{out}"
        );
    }

    #[test]
    fn halfway_nybbles_pack_two_levels_per_byte() {
        let mut levels: Vec<Level> = [6u8, 5, 4, 3]
            .into_iter()
            .map(|checkpoint| Level {
                start_area: "field".to_owned(),
                checkpoint,
            })
            .collect();
        levels.push(Level::new("castle"));
        let scenario = Scenario {
            worlds: vec![World {
                levels,
                hidden_1up_cost: 0,
            }],
        };
        let packed = halfway_nybbles(&scenario, &sample_atlas());
        assert_eq!(vec![0x65, 0x43], packed);
    }

    #[test]
    fn autowalk_levels_do_not_occupy_a_halfway_slot() {
        let mut atlas = sample_atlas();
        let autowalk_area = atlas
            .get_mut("field")
            .unwrap_or_else(|| panic!("missing area"));
        autowalk_area.header.autowalk = true;
        let scenario = Scenario {
            worlds: vec![World {
                levels: vec![
                    Level {
                        start_area: "field".to_owned(),
                        checkpoint: 0,
                    },
                    Level {
                        start_area: "field_2".to_owned(),
                        checkpoint: 7,
                    },
                ],
                hidden_1up_cost: 0,
            }],
        };
        assert_eq!(vec![0x70, 0x00], halfway_nybbles(&scenario, &atlas));
    }

    #[test]
    fn geography_source_has_offsets_addresses_and_blocks() {
        let out = geography_tables(&sample_atlas());
        assert!(
            out.contains("AreaDataHOffsets:\n    .byte $00, $00, $02, $03"),
            "{out}"
        );
        assert!(
            out.contains(".define AreaDataAddr G_field, G_field_2, G_cellar, G_castle"),
            "{out}"
        );
        assert!(out.contains("AreaDataAddrLow:\n    .lobytes AreaDataAddr"), "{out}");
        // A bare area is still a header and a sentinel.
        assert!(out.contains("G_field:\n    .byte $50, $21, $fd"), "{out}");
    }

    #[test]
    fn population_source_mirrors_the_geography_shape() {
        let out = population_tables(&sample_atlas()).unwrap_or_else(|e| panic!("{e}"));
        assert!(out.contains("EnemyAddrHOffsets:"), "{out}");
        assert!(out.contains("EnemyDataAddrHigh:\n    .hibytes EnemyDataAddr"), "{out}");
        assert!(out.contains("P_castle:\n    .byte $ff"), "{out}");
    }

    #[test]
    fn unknown_start_area_is_an_error() {
        let scenario = Scenario {
            worlds: vec![World {
                levels: vec![Level::new("nowhere")],
                hidden_1up_cost: 0,
            }],
        };
        assert!(matches!(
            scenario_tables(&scenario, &sample_atlas()),
            Err(AsmError::Model(ModelError::UnknownArea { id })) if id == "nowhere"
        ));
    }

    #[test]
    fn game_bundle_has_three_sources() {
        let game = Game {
            id: "smb".to_owned(),
            atlas: sample_atlas(),
            scenario: Scenario::default(),
        };
        let bundle = game_tables(&game).unwrap_or_else(|e| panic!("{e}"));
        let names: Vec<&str> = bundle.keys().map(String::as_str).collect();
        assert_eq!(vec!["geography", "population", "scenario"], names);
    }
}
