//! OpeningFarm - chess opening practice.
//!
//! Pick a named opening, play its moves on the board and the scripted
//! replies are played back until the line is complete.

mod app;
mod cli;
mod domain;
mod models;
mod ui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use gpui::{App, Application};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use domain::{Catalogue, CatalogueFile};
use ui::FileAssets;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    match cli.command {
        Some(Command::Schema) => print_schema(),
        Some(Command::List) => {
            let catalogue = load_catalogue(&cli)?;
            print_catalogue(&catalogue);
            Ok(())
        }
        None => run_window(cli),
    }
}

fn load_catalogue(cli: &Cli) -> Result<Catalogue> {
    let catalogue = match &cli.openings {
        Some(path) => Catalogue::load(path)
            .with_context(|| format!("loading openings from {}", path.display()))?,
        None => Catalogue::builtin().context("loading built-in openings")?,
    };
    if catalogue.is_empty() {
        bail!("the opening catalogue is empty");
    }

    for problem in catalogue.verify_all() {
        warn!(%problem, "opening line does not replay");
    }
    Ok(catalogue)
}

fn print_catalogue(catalogue: &Catalogue) {
    let mut tier = None;

    for opening in catalogue.by_difficulty() {
        if tier != Some(opening.difficulty) {
            tier = Some(opening.difficulty);
            println!("{}", opening.difficulty);
        }
        let flag = if opening.verify().is_err() {
            "  (broken line)"
        } else {
            ""
        };
        println!(
            "  {:<20} {:<24} {}{}",
            opening.id, opening.name, opening.moves, flag
        );
    }
}

fn print_schema() -> Result<()> {
    let schema = schemars::schema_for!(CatalogueFile);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn run_window(cli: Cli) -> Result<()> {
    let catalogue = load_catalogue(&cli)?;
    let config = app::AppConfig {
        catalogue,
        opening: cli.opening.clone(),
        reply_delay: cli.reply_delay(),
    };

    info!("starting OpeningFarm");
    Application::new()
        .with_assets(FileAssets::new(cli.assets))
        .run(move |cx: &mut App| app::run(cx, config));
    Ok(())
}
