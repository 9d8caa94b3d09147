//! Headless Force Tetris runner (default binary).
//!
//! Drives the engine with a simple placement bot at a fixed 16ms timestep.
//! Narrative events go to stderr, the final public state to stdout as JSON.
//!
//! ```text
//! force-tetris [--seed N] [--mode standard|empire] [--steps N] [--config FILE]
//! ```

use anyhow::{bail, Context, Result};

use force_tetris::core::{EngineConfig, GameState, RandRandom, RandomSource, SimpleRng};
use force_tetris::types::{GameAction, Mode, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

const DEFAULT_STEPS: u32 = 20_000;

#[derive(Debug, Default)]
struct Args {
    seed: Option<u32>,
    mode: Option<Mode>,
    steps: Option<u32>,
    config: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .with_context(|| format!("missing value for {flag}"))
        };
        match flag.as_str() {
            "--seed" => {
                let raw = value()?;
                args.seed = Some(raw.parse().with_context(|| format!("bad seed: {raw}"))?);
            }
            "--steps" => {
                let raw = value()?;
                args.steps = Some(raw.parse().with_context(|| format!("bad step count: {raw}"))?);
            }
            "--mode" => args.mode = Some(Mode::parse(&value()?)),
            "--config" => args.config = Some(value()?),
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(args)
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {path}"))?;
            EngineConfig::from_json(&json).with_context(|| format!("parsing config {path}"))?
        }
        None => EngineConfig::default(),
    };
    if let Some(mode) = args.mode {
        config = config.with_mode(mode);
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let config = load_config(&args)?;
    let steps = args.steps.unwrap_or(DEFAULT_STEPS);

    let json = match args.seed {
        Some(seed) => run(GameState::with_random(config, SimpleRng::new(seed)), steps)?,
        None => run(GameState::with_random(config, RandRandom::thread()), steps)?,
    };
    println!("{json}");
    Ok(())
}

fn run<R: RandomSource + Clone>(mut game: GameState<R>, steps: u32) -> Result<String> {
    game.start(None);
    let mut plan: Option<Placement> = None;

    for _ in 0..steps {
        if game.force().ready() {
            game.apply_action(GameAction::ActivateForce);
        }

        if game.running() {
            let placement = *plan.get_or_insert_with(|| best_placement(&game));
            if steer(&mut game, placement) {
                plan = None;
            }
        }

        if game.tick(TICK_MS).locked {
            plan = None;
        }

        for event in game.pull_events() {
            eprintln!("[engine] {event}");
        }
        if game.game_over() {
            break;
        }
    }

    let state = game.public_state();
    eprintln!(
        "[engine] score={} lines={} level={} rank={}",
        state.score, state.lines, state.level, state.rank
    );
    state.to_json().context("serializing public state")
}

/// Clockwise turns then final column for the active piece
#[derive(Debug, Clone, Copy)]
struct Placement {
    turns: u8,
    x: i8,
}

/// One intent per step toward `target`. True once the piece was dropped.
fn steer<R: RandomSource>(game: &mut GameState<R>, target: Placement) -> bool {
    let Some(active) = game.active() else {
        return false;
    };

    let wants_turn = active.rotation.index() != usize::from(target.turns);
    if wants_turn && game.rotate(true) {
        return false;
    }
    // A blocked turn still slides toward the column
    if active.x < target.x && game.move_piece(1) {
        return false;
    }
    if active.x > target.x && game.move_piece(-1) {
        return false;
    }

    game.hard_drop().locked
}

/// Try every rotation and column on a copy of the game and keep the best board
fn best_placement<R: RandomSource + Clone>(game: &GameState<R>) -> Placement {
    let mut best = Placement { turns: 0, x: 0 };
    let mut best_score = f64::MIN;

    for turns in 0..4u8 {
        for x in -2..BOARD_WIDTH as i8 {
            let mut trial = game.clone();
            let rotated = (0..turns).all(|_| trial.rotate(true));
            if !rotated {
                continue;
            }
            let Some(piece) = trial.active() else {
                continue;
            };
            let step = if x < piece.x { -1 } else { 1 };
            while trial.active().map_or(false, |p| p.x != x) {
                if !trial.move_piece(step) {
                    break;
                }
            }
            if trial.active().map_or(true, |p| p.x != x) {
                continue;
            }

            let cleared = trial
                .hard_drop()
                .lock
                .map_or(0, |lock| lock.cleared_count());
            let score = evaluate(&trial, cleared);
            if score > best_score {
                best_score = score;
                best = Placement { turns, x };
            }
        }
    }

    best
}

/// Classic heuristic: reward clears, punish height, holes and bumpiness
fn evaluate<R: RandomSource>(game: &GameState<R>, cleared: usize) -> f64 {
    if game.game_over() {
        return f64::MIN / 2.0;
    }

    let board = game.board();
    let mut heights = [0i32; BOARD_WIDTH as usize];
    let mut holes = 0i32;

    for x in 0..BOARD_WIDTH as i8 {
        let mut seen_block = false;
        for y in 0..BOARD_HEIGHT as i8 {
            if board.is_occupied(x, y) {
                if !seen_block {
                    heights[x as usize] = BOARD_HEIGHT as i32 - y as i32;
                    seen_block = true;
                }
            } else if seen_block {
                holes += 1;
            }
        }
    }

    let aggregate: i32 = heights.iter().sum();
    let bumpiness: i32 = heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum();

    0.76 * cleared as f64 - 0.51 * aggregate as f64 - 0.36 * holes as f64
        - 0.18 * bumpiness as f64
}
