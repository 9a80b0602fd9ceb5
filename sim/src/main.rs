use std::path::PathBuf;

use anyhow::Context;
use blastgrid_core::*;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

mod player;
mod settings;

use player::AutoPlayer;

/// Plays BlastGrid headless with a simple deterministic player.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Preset grid: easy, medium or hard
    #[arg(short, long, value_parser = settings::parse_level)]
    level: Option<Level>,

    /// TOML file with level/rows/cols/mines
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<Coord>,

    #[arg(long)]
    cols: Option<Coord>,

    #[arg(long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    games: u32,

    /// Print one JSON report per game instead of the summary
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct GameReport {
    seed: u64,
    won: bool,
    moves: u32,
    elapsed_secs: u32,
    snapshot: Snapshot,
}

fn play(config: GameConfig, seed: u64) -> anyhow::Result<GameReport> {
    let mut session = Session::new(config, seed)?;
    let mut player = AutoPlayer::new(seed);
    // every action changes at least one cell, so this bound is never hit by a correct player
    let max_moves = u32::from(config.total_cells()) * 2 + 1;
    let mut moves = 0;

    while let Some(action) = player.next_action(&session.snapshot()) {
        log::trace!("Move {}: {:?}", moves, action);
        if !player::apply(&mut session, action) {
            log::warn!("Action {:?} had no effect", action);
        }
        moves += 1;
        anyhow::ensure!(moves <= max_moves, "Player stuck after {moves} moves, seed {seed:#x}");
    }

    let snapshot = session.snapshot();
    log::debug!("Final grid for seed {:#x}:\n{}", seed, snapshot);
    Ok(GameReport {
        seed,
        won: snapshot.has_won,
        moves,
        elapsed_secs: snapshot.elapsed_secs,
        snapshot,
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let file = args
        .config
        .as_deref()
        .map(settings::FileSettings::load)
        .transpose()?;
    let overrides = settings::Overrides {
        rows: args.rows,
        cols: args.cols,
        mines: args.mines,
    };
    let config = settings::resolve(args.level, file, overrides)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "Playing {} game(s) on {}x{} with {} mines, seed {:#x}",
        args.games,
        config.rows(),
        config.cols(),
        config.mines,
        seed
    );

    let mut seeds = SmallRng::seed_from_u64(seed);
    let mut wins = 0;
    for game in 0..args.games {
        let game_seed = if game == 0 { seed } else { seeds.random() };
        let report = play(config, game_seed)?;
        if report.won {
            wins += 1;
        }

        if args.json {
            let line = serde_json::to_string(&report).context("Could not serialize report")?;
            println!("{line}");
        } else {
            log::info!(
                "Game {} (seed {:#x}): {} in {} moves",
                game + 1,
                report.seed,
                if report.won { "won" } else { "lost" },
                report.moves
            );
        }
    }

    if !args.json {
        let rate = if args.games == 0 {
            0.0
        } else {
            f64::from(wins) * 100.0 / f64::from(args.games)
        };
        println!("{wins}/{} games won ({rate:.1}%)", args.games);
    }
    Ok(())
}
