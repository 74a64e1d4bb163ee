#![forbid(unsafe_code)]

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use lakitu_asm::{export_bundle, game_tables};
use lakitu_model::Game;
use lakitu_rom::{extract_game, RomImage, RomLayout};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "lakitu", about = "Read and write Super Mario Bros. level data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract a game image into a JSON project file
    Extract {
        /// Path to a headerless PRG image
        rom: PathBuf,
        /// Where to write the project file
        #[arg(long, short = 'o', default_value = "project.json")]
        output: PathBuf,
        /// TOML layout override for modified images
        #[arg(long)]
        layout: Option<PathBuf>,
    },
    /// Export a project file as assembly sources
    Export {
        /// Path to a JSON project file
        project: PathBuf,
        /// Directory to write the .asm files into
        #[arg(long, short = 'o', default_value = "asm")]
        output: PathBuf,
    },
    /// Summarize a project file or game image
    Info {
        /// Path to a JSON project file or a game image
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Extract {
            rom,
            output,
            layout,
        } => cmd_extract(&rom, &output, layout.as_deref()),
        Command::Export { project, output } => cmd_export(&project, &output),
        Command::Info { file } => cmd_info(&file),
    };

    if let Err(msg) = result {
        eprintln!("error: {msg}");
        process::exit(1);
    }
}

fn cmd_extract(rom: &Path, output: &Path, layout: Option<&Path>) -> CliResult {
    let layout = match layout {
        Some(path) => RomLayout::from_path(path)?,
        None => RomLayout::default(),
    };
    let image = RomImage::from_path(rom)?;
    let game = extract_game(&image, &layout)?;
    game.write_to(output)?;
    eprintln!(
        "    Extracted {} areas, {} worlds to {}",
        game.atlas.len(),
        game.scenario.worlds.len(),
        output.display()
    );
    Ok(())
}

fn cmd_export(project: &Path, output: &Path) -> CliResult {
    let game = Game::from_path(project)?;
    let bundle = game_tables(&game)?;
    export_bundle(output, &bundle)?;
    for name in bundle.keys() {
        eprintln!("    Wrote {}", output.join(format!("{name}.asm")).display());
    }
    Ok(())
}

fn cmd_info(file: &Path) -> CliResult {
    let summary = if file.extension().is_some_and(|e| e == "json") {
        describe_game(&Game::from_path(file)?)
    } else {
        describe_image(&RomImage::from_path(file)?)
    };
    println!("{summary}");
    Ok(())
}

fn describe_game(game: &Game) -> String {
    let [underwater, overworld, underground, castle] = game.atlas.environment_counts();
    format!(
        "project: {}\nareas: {} ({underwater} underwater, {overworld} overworld, \
         {underground} underground, {castle} castle)\nworlds: {}\nlevels: {}",
        game.id,
        game.atlas.len(),
        game.scenario.worlds.len(),
        game.scenario.level_count()
    )
}

fn describe_image(image: &RomImage) -> String {
    format!("image: {} bytes\nsha256: {}", image.len(), image.digest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lakitu_model::area::{Area, Environment};
    use lakitu_model::scenario::{Level, World};

    #[test]
    fn game_summary_counts_areas_and_levels() {
        let mut game = Game::new("smb");
        game.atlas
            .add_all([
                Area {
                    environment: Environment::Overworld,
                    ..Area::new("Area_20")
                },
                Area {
                    environment: Environment::Castle,
                    ..Area::new("Area_60")
                },
            ])
            .unwrap_or_else(|e| panic!("{e}"));
        game.scenario.worlds.push(World {
            levels: vec![Level::new("Area_20"), Level::new("Area_60")],
            hidden_1up_cost: 10,
        });
        let summary = describe_game(&game);
        assert!(summary.contains("project: smb"), "{summary}");
        assert!(
            summary.contains("areas: 2 (0 underwater, 1 overworld, 0 underground, 1 castle)"),
            "{summary}"
        );
        assert!(summary.contains("levels: 2"), "{summary}");
    }

    #[test]
    fn image_summary_shows_size_and_digest() {
        let summary = describe_image(&RomImage::from_bytes(Vec::new()));
        assert!(summary.contains("image: 0 bytes"), "{summary}");
        assert!(
            summary.contains("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
            "{summary}"
        );
    }

    #[test]
    fn extract_then_export_round_trips_through_files() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let project = dir.path().join("game.json");
        let mut game = Game::new("smb");
        game.atlas
            .add(Area::new("Area_20"))
            .unwrap_or_else(|e| panic!("{e}"));
        game.write_to(&project).unwrap_or_else(|e| panic!("{e}"));

        let out = dir.path().join("asm");
        cmd_export(&project, &out).unwrap_or_else(|e| panic!("{e}"));
        assert!(out.join("geography.asm").exists());
        assert!(out.join("population.asm").exists());
        assert!(out.join("scenario.asm").exists());
    }
}
