use std::path::PathBuf;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::Serialize;
use tetromino_engine::{Color, Direction, Game, GameConfig, GameState, GameStats, PieceSeed};
use tracing::{debug, info};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed for piece sequences and inputs (32 hex digits); random if omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Game config file (JSON); missing fields take default values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Simulated milliseconds between gravity ticks
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(1..))]
    tick_ms: u32,
    /// Maximum number of ticks per game
    #[arg(long, default_value_t = 10_000)]
    max_ticks: usize,
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Include the final board and next piece preview in the report
    #[arg(long)]
    show_board: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// One player input, issued before each gravity tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Idle,
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateRight,
    RotateLeft,
    HardDrop,
}

impl Distribution<Action> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        match rng.random_range(0..20) {
            0..=4 => Action::Idle,
            5..=8 => Action::MoveLeft,
            9..=12 => Action::MoveRight,
            13..=14 => Action::SoftDrop,
            15..=16 => Action::RotateRight,
            17 => Action::RotateLeft,
            _ => Action::HardDrop,
        }
    }
}

impl Action {
    fn apply(self, game: &mut Game) {
        match self {
            Action::Idle => {}
            Action::MoveLeft => {
                game.move_tetromino(-1, 0);
            }
            Action::MoveRight => {
                game.move_tetromino(1, 0);
            }
            Action::SoftDrop => {
                game.move_tetromino(0, 1);
            }
            Action::RotateRight => {
                game.rotate_tetromino(Direction::Right);
            }
            Action::RotateLeft => {
                game.rotate_tetromino(Direction::Left);
            }
            Action::HardDrop => game.drop_tetromino(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SimulationReport {
    seed: PieceSeed,
    tick_ms: u32,
    max_ticks: usize,
    config: GameConfig,
    games: Vec<GameReport>,
}

#[derive(Debug, Clone, Serialize)]
struct GameReport {
    piece_seed: PieceSeed,
    ticks: usize,
    state: GameState,
    drop_interval: u32,
    stats: GameStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    board: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_piece: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy)]
struct PlayOptions {
    tick_ms: u32,
    max_ticks: usize,
    show_board: bool,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        config,
        tick_ms,
        max_ticks,
        games,
        show_board,
        output,
    } = arg;

    let config = match config {
        Some(path) => util::read_config_file(path)?,
        None => GameConfig::default(),
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let options = PlayOptions {
        tick_ms: *tick_ms,
        max_ticks: *max_ticks,
        show_board: *show_board,
    };
    info!(%seed, games = *games, tick_ms = *tick_ms, "starting simulation");

    let report = simulate(&config, seed, *games, options)?;
    Output::save_json(&report, output.as_deref())
}

fn simulate(
    config: &GameConfig,
    seed: PieceSeed,
    games: usize,
    options: PlayOptions,
) -> anyhow::Result<SimulationReport> {
    let mut rng = Pcg32::from_seed(*seed.as_bytes());
    let games = (0..games)
        .map(|index| {
            let piece_seed = rng.random();
            let report = play_game(config, piece_seed, &mut rng, options)?;
            info!(
                game = index,
                score = report.stats.score(),
                lines_cleared = report.stats.lines_cleared(),
                ticks = report.ticks,
                "game finished"
            );
            Ok(report)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(SimulationReport {
        seed,
        tick_ms: options.tick_ms,
        max_ticks: options.max_ticks,
        config: config.clone(),
        games,
    })
}

fn play_game<R>(
    config: &GameConfig,
    piece_seed: PieceSeed,
    rng: &mut R,
    options: PlayOptions,
) -> anyhow::Result<GameReport>
where
    R: Rng,
{
    let mut game = Game::with_seed(config.clone(), piece_seed)?;
    game.start();
    debug!(%piece_seed, "game started");

    let mut ticks = 0;
    while ticks < options.max_ticks && !game.state().is_game_over() {
        let action: Action = rng.random();
        action.apply(&mut game);
        game.update(options.tick_ms);
        ticks += 1;
    }

    let (board, next_piece) = if options.show_board {
        let board = game.render_board();
        let preview = game.next_tetromino().preview();
        (
            Some(color_rows(board.rows())),
            Some(color_rows(preview.iter().map(<[Color; 4]>::as_slice))),
        )
    } else {
        (None, None)
    };

    Ok(GameReport {
        piece_seed,
        ticks,
        state: game.state(),
        drop_interval: game.drop_interval(),
        stats: game.stats().clone(),
        board,
        next_piece,
    })
}

fn color_rows<'a, I>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [Color]>,
{
    rows.into_iter()
        .map(|row| row.iter().map(|cell| cell.as_char()).collect())
        .collect()
}
