use anyhow::{bail, Result};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use desarma_core::{
    GameConfig, HostGame, HostState, MinefieldGenerator, Move, RandomMinefieldGenerator,
    RevealOutcome, StartCell, SweepAgent,
};
use serde::Serialize;

/// Plays autonomous Minesweeper episodes: a simulated host generates boards
/// and the desarma agent picks every uncover.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Board width in cells.
    #[arg(long, default_value_t = 9)]
    width: u8,
    /// Board height in cells.
    #[arg(long, default_value_t = 9)]
    height: u8,
    /// Number of mines to place.
    #[arg(long, default_value_t = 10)]
    mines: u16,
    /// Number of episodes; episode i plays with seed + i.
    #[arg(long, default_value_t = 1)]
    episodes: u32,
    /// Base seed for minefield generation.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Only keep the start cell itself clear instead of its whole
    /// neighborhood.
    #[arg(long)]
    hard_start: bool,
    /// Emit the run summary as JSON instead of plain text.
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Outcome {
    /// Every safe cell was uncovered.
    Solved,
    /// The agent gave up with covered cells left.
    Stalled,
    /// A frontier guess hit a mine.
    Lost,
}

#[derive(Debug, Serialize)]
struct EpisodeReport {
    seed: u64,
    outcome: Outcome,
    moves: u32,
    uncovered: u16,
}

#[derive(Debug, Serialize)]
struct RunReport {
    width: u8,
    height: u8,
    mines: u16,
    solved: u32,
    stalled: u32,
    lost: u32,
    episodes: Vec<EpisodeReport>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let config = GameConfig::new((args.width, args.height), args.mines);
    if config.mines != args.mines {
        log::warn!(
            "mine count clamped from {} to {} to fit the board",
            args.mines,
            config.mines
        );
    }
    let start_cell = if args.hard_start {
        StartCell::SimpleSafe
    } else {
        StartCell::AlwaysZero
    };

    let mut report = RunReport {
        width: config.size.0,
        height: config.size.1,
        mines: config.mines,
        solved: 0,
        stalled: 0,
        lost: 0,
        episodes: Vec::with_capacity(args.episodes as usize),
    };

    for i in 0..args.episodes {
        let seed = args.seed.wrapping_add(u64::from(i));
        let episode = run_episode(config, seed, start_cell)?;
        match episode.outcome {
            Outcome::Solved => report.solved += 1,
            Outcome::Stalled => report.stalled += 1,
            Outcome::Lost => report.lost += 1,
        }
        if !args.json {
            println!(
                "episode {:>4}  seed {:>6}  {:<8}  {:>4} moves, {:>3} cells uncovered",
                i,
                episode.seed,
                format!("{:?}", episode.outcome).to_lowercase(),
                episode.moves,
                episode.uncovered
            );
        }
        report.episodes.push(episode);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}x{} with {} mines: {} solved, {} stalled, {} lost out of {}",
            report.width,
            report.height,
            report.mines,
            report.solved,
            report.stalled,
            report.lost,
            args.episodes
        );
    }
    Ok(())
}

/// One full game: reveal the start cell, then alternate clue ingestion and
/// uncover requests until the agent stops or a guess goes wrong.
fn run_episode(config: GameConfig, seed: u64, start_cell: StartCell) -> Result<EpisodeReport> {
    let start = (config.size.0 / 2, config.size.1 / 2);
    let layout = RandomMinefieldGenerator::new(seed, start, start_cell).generate(config);
    let mut host = HostGame::new(layout);
    let mut agent = SweepAgent::new(config, start)?;
    let mut moves = 0u32;

    let mut clue = match host.reveal(start)? {
        RevealOutcome::Clue(n) | RevealOutcome::Won(n) => n,
        RevealOutcome::HitMine => bail!("generated board has a mined start cell"),
    };

    let outcome = loop {
        match agent.next_move(clue)? {
            Move::Stop => {
                break if host.state() == HostState::Won {
                    Outcome::Solved
                } else {
                    Outcome::Stalled
                };
            }
            Move::Uncover(coords) => {
                moves += 1;
                log::debug!("uncovering {coords:?}");
                match host.reveal(coords)? {
                    RevealOutcome::Clue(n) | RevealOutcome::Won(n) => clue = n,
                    RevealOutcome::HitMine => break Outcome::Lost,
                }
            }
        }
    };

    log::info!(
        "seed {seed}: {outcome:?} after {moves} moves, {} mines unflagged",
        agent.mines_left()
    );
    Ok(EpisodeReport {
        seed,
        outcome,
        moves,
        uncovered: host.uncovered_count(),
    })
}
