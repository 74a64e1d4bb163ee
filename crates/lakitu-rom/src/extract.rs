//! Pulling a full typed game out of an image.
//!
//! Areas come out in the environment order the image stores them in and
//! are named `Area_<index>` after their index number, which keeps exit
//! pointer destinations resolvable without a second pass.

use lakitu_bytecode::{parse_geography, parse_population, GEOGRAPHY_END, POPULATION_END};
use lakitu_model::area::{Area, Environment};
use lakitu_model::atlas::Atlas;
use lakitu_model::scenario::{Level, Scenario, World};
use lakitu_model::{Game, ModelError};

use crate::error::RomError;
use crate::image::RomImage;
use crate::layout::RomLayout;

/// Extract the atlas and scenario from an image.
///
/// # Errors
/// Fails when a table read runs outside the image, an area's bytecode
/// does not parse, or the scenario references an area index the atlas
/// does not contain.
pub fn extract_game(image: &RomImage, layout: &RomLayout) -> Result<Game, RomError> {
    let atlas = extract_atlas(image, layout)?;
    let scenario = extract_scenario(image, layout, &atlas)?;
    Ok(Game {
        id: image.digest().to_owned(),
        atlas,
        scenario,
    })
}

fn extract_atlas(image: &RomImage, layout: &RomLayout) -> Result<Atlas, RomError> {
    let mut atlas = Atlas::new();
    for environment in Environment::ALL {
        let env_id = usize::from(environment.id());
        let count = layout.area_counts.get(env_id).copied().unwrap_or(0);
        let geo_base =
            usize::from(image.byte_at(layout.geography_environment_offsets + env_id)?);
        let pop_base =
            usize::from(image.byte_at(layout.population_environment_offsets + env_id)?);
        for sub in 0..count {
            let index = (environment.id() << 5) | u8::try_from(sub).unwrap_or(0x1F);
            let geo_addr = image.address_at(
                layout.geography_address_lsbs,
                layout.geography_address_msbs,
                geo_base + sub,
            )?;
            let (header, geography) = parse_geography(image.file_at(geo_addr, GEOGRAPHY_END)?)?;
            let pop_addr = image.address_at(
                layout.population_address_lsbs,
                layout.population_address_msbs,
                pop_base + sub,
            )?;
            let population = parse_population(image.file_at(pop_addr, POPULATION_END)?)?;
            atlas.add(Area {
                id: format!("Area_{index:02X}"),
                familiar_name: String::new(),
                environment,
                header,
                geography,
                population,
            })?;
        }
    }
    Ok(atlas)
}

fn extract_scenario(
    image: &RomImage,
    layout: &RomLayout,
    atlas: &Atlas,
) -> Result<Scenario, RomError> {
    let mut worlds = Vec::new();
    for (world, &level_count) in layout.levels_per_world.iter().enumerate() {
        let offset = usize::from(image.byte_at(layout.world_offset_table + world)?);
        let hidden_1up_cost = image.byte_at(layout.hidden_1up_price_table + world)?;
        // Four halfway nybbles per world, packed two levels per byte.
        let packed_low = image.byte_at(layout.checkpoint_table + 2 * world)?;
        let packed_high = image.byte_at(layout.checkpoint_table + 2 * world + 1)?;
        let nybbles = [
            packed_low >> 4,
            packed_low & 0x0F,
            packed_high >> 4,
            packed_high & 0x0F,
        ];

        let mut levels = Vec::new();
        // Autowalk entrances do not advance the level number the engine
        // uses to look up halfway points.
        let mut level_number = 0usize;
        for entry in 0..usize::from(level_count) {
            let index = image.byte_at(layout.area_index_table + offset + entry)? & 0x7F;
            let id = format!("Area_{index:02X}");
            let area = atlas
                .get(&id)
                .ok_or_else(|| ModelError::UnknownArea { id: id.clone() })?;
            let checkpoint = if area.header.autowalk {
                0
            } else {
                let nybble = nybbles.get(level_number).copied().unwrap_or(0);
                level_number += 1;
                nybble
            };
            levels.push(Level {
                start_area: id,
                checkpoint,
            });
        }
        worlds.push(World {
            levels,
            hidden_1up_cost,
        });
    }
    Ok(Scenario { worlds })
}
