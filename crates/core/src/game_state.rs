//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, randomizer,
//! scoring, lock delay and the force meter. It owns the session lifecycle
//! and turns player intents and elapsed time into state changes.

use crate::board::Board;
use crate::config::EngineConfig;
use crate::events::EventLog;
use crate::force::ForceMeter;
use crate::lock_delay::LockDelay;
use crate::outcome::{DropOutcome, ForceOutcome, HardDropOutcome, LockOutcome, TickOutcome};
use crate::pieces::{try_rotate, Tetromino};
use crate::rng::{PieceQueue, RandomSource, SimpleRng};
use crate::scoring::{
    calculate_clear_charge, calculate_drop_score, calculate_force_blast_bonus, calculate_level,
    calculate_score, calculate_tspin_no_line_score, get_drop_interval_ms, rank_for, ScoreResult,
};
use crate::snapshot::{PieceSnapshot, PublicState};
use crate::types::*;

/// Diagonal neighbours of a T piece's centre, checked for spins
const T_CORNERS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

const SPAWN_DEFEAT: &str = "Mission failed. The fleet was overrun.";
const HOLD_DEFEAT: &str = "Hold dock overloaded. Mission failed.";

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    config: EngineConfig,
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    can_hold: bool,
    piece_queue: PieceQueue<R>,
    status: SessionStatus,
    score: u32,
    lines: u32,
    level: u32,
    combo: i32,
    back_to_back: bool,
    /// Spin marker of the most recent lock
    last_spin: Option<SpinKind>,
    last_action_was_rotate: bool,
    lock_delay: LockDelay,
    gravity_ms: u32,
    force: ForceMeter,
    events: EventLog,
}

impl GameState<SimpleRng> {
    /// Create a new standard-rules game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(EngineConfig::default(), seed)
    }

    pub fn with_config(config: EngineConfig, seed: u32) -> Self {
        Self::with_random(config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a game drawing pieces from an injected random source
    pub fn with_random(config: EngineConfig, random: R) -> Self {
        Self {
            config,
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            piece_queue: PieceQueue::with_random(random),
            status: SessionStatus::Waiting,
            score: 0,
            lines: 0,
            level: START_LEVEL,
            combo: -1,
            back_to_back: false,
            last_spin: None,
            last_action_was_rotate: false,
            lock_delay: LockDelay::Inactive,
            gravity_ms: 0,
            force: ForceMeter::new(),
            events: EventLog::new(config.event_log_capacity),
        }
    }

    // ---- lifecycle ----

    /// Reset everything and begin a session, optionally switching mode first
    pub fn start(&mut self, mode: Option<Mode>) -> PublicState {
        if let Some(mode) = mode {
            self.config.mode = mode;
        }

        self.reset();
        self.status = SessionStatus::Running;
        self.spawn_piece();
        self.events.push(match self.config.mode {
            Mode::Standard => "Alliance Standard mode online. Precision wins this battle.",
            Mode::Empire => "Empire Assault mode engaged. Fast lanes and no mercy.",
        });
        self.public_state()
    }

    /// Back to a fresh waiting session. The mode is kept.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.piece_queue.reset();
        self.status = SessionStatus::Waiting;
        self.score = 0;
        self.lines = 0;
        self.level = START_LEVEL;
        self.combo = -1;
        self.back_to_back = false;
        self.last_spin = None;
        self.last_action_was_rotate = false;
        self.lock_delay.disarm();
        self.gravity_ms = 0;
        self.force = ForceMeter::new();
        self.events.clear();
    }

    /// Change mode; gravity picks it up immediately
    pub fn set_mode(&mut self, mode: Mode) -> Mode {
        self.config.mode = mode;
        self.events.push(match mode {
            Mode::Standard => "Next mission mode: Alliance Standard",
            Mode::Empire => "Next mission mode: Empire Assault",
        });
        self.config.mode
    }

    /// Flip between running and paused. Returns whether the game is paused.
    ///
    /// Waiting and defeated sessions are left alone.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            SessionStatus::Running => {
                self.status = SessionStatus::Paused;
                self.events.push("Mission paused.");
            }
            SessionStatus::Paused => {
                self.status = SessionStatus::Running;
                self.events.push("Mission resumed.");
            }
            SessionStatus::Waiting | SessionStatus::Defeat => {}
        }
        self.status == SessionStatus::Paused
    }

    /// End a live session without defeat
    pub fn stop(&mut self) {
        if self.status.is_running() {
            self.status = SessionStatus::Waiting;
        }
    }

    // ---- accessors ----

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn running(&self) -> bool {
        self.status.is_running()
    }

    pub fn paused(&self) -> bool {
        self.status == SessionStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == SessionStatus::Defeat
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    pub fn last_spin(&self) -> Option<SpinKind> {
        self.last_spin
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn next_queue(&self) -> [PieceKind; NEXT_QUEUE_LEN] {
        self.piece_queue.preview()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scenario setup (puzzles, tests)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn force(&self) -> &ForceMeter {
        &self.force
    }

    pub fn lock_delay(&self) -> LockDelay {
        self.lock_delay
    }

    pub fn rank(&self) -> &'static str {
        rank_for(self.score, self.lines)
    }

    /// Current gravity interval from level and mode
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level, self.config.mode)
    }

    // ---- queries ----

    /// Deep copy of everything a collaborator may read
    pub fn public_state(&self) -> PublicState {
        PublicState {
            board: self.board.rows(),
            active: self.active.map(PieceSnapshot::from),
            ghost: self.ghost().map(PieceSnapshot::from),
            next_queue: self.piece_queue.preview(),
            hold: self.hold,
            can_hold: self.can_hold,
            score: self.score,
            lines: self.lines,
            level: self.level,
            combo: self.combo,
            back_to_back: self.back_to_back,
            force_meter: self.force.value(),
            force_ready: self.force.ready(),
            force_uses: self.force.uses(),
            rank: self.rank(),
            mode: self.config.mode,
            status: self.status,
            running: self.running(),
            paused: self.paused(),
            game_over: self.game_over(),
            drop_interval_ms: self.drop_interval_ms(),
            spin: self.last_spin,
            lock_delay: self.lock_delay,
        }
    }

    /// Take all queued narrative messages, oldest first
    pub fn pull_events(&mut self) -> Vec<String> {
        self.events.drain()
    }

    /// Where the active piece would come to rest
    pub fn ghost(&self) -> Option<Tetromino> {
        let active = self.active?;
        Some(active.shifted(0, self.drop_distance(&active) as i8))
    }

    /// Check if the active piece is resting on the floor or the stack
    pub fn is_grounded(&self) -> bool {
        self.active
            .map_or(false, |piece| self.collides(&piece.shifted(0, 1)))
    }

    // ---- intents ----

    /// Shift the active piece sideways by `dx` columns
    pub fn move_piece(&mut self, dx: i8) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };

        let moved = active.shifted(dx, 0);
        if self.collides(&moved) {
            return false;
        }

        self.active = Some(moved);
        self.last_action_was_rotate = false;
        self.lock_delay
            .refresh(self.config.lock_delay_ms, self.config.lock_reset_limit);
        true
    }

    /// Move down one row. A blocked soft drop arms the lock delay rather
    /// than locking.
    pub fn soft_drop(&mut self) -> DropOutcome {
        let Some(active) = self.controllable() else {
            return DropOutcome::default();
        };

        let lowered = active.shifted(0, 1);
        if self.collides(&lowered) {
            self.lock_delay.arm(self.config.lock_delay_ms);
            return DropOutcome::default();
        }

        self.active = Some(lowered);
        self.last_action_was_rotate = false;
        // Airborne again
        self.lock_delay.disarm();
        self.score = self.score.saturating_add(calculate_drop_score(1, false));
        self.add_force(FORCE_SOFT_DROP);
        self.gravity_ms = 0;

        DropOutcome {
            moved: true,
            locked: false,
        }
    }

    /// Drop to rest and lock immediately
    pub fn hard_drop(&mut self) -> HardDropOutcome {
        let Some(active) = self.controllable() else {
            return HardDropOutcome::default();
        };

        let distance = self.drop_distance(&active);
        self.active = Some(active.shifted(0, distance as i8));

        if distance > 0 {
            self.score = self
                .score
                .saturating_add(calculate_drop_score(distance, true));
            self.add_force(distance as f64 * FORCE_HARD_DROP_PER_CELL);
        }

        let lock = self.lock_piece();
        HardDropOutcome {
            distance,
            locked: true,
            lock,
        }
    }

    /// Rotate with SRS wall kicks
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };

        let board = &self.board;
        let Some(rotated) = try_rotate(&active, clockwise, |m, x, y| board.collides(m, x, y))
        else {
            return false;
        };

        self.active = Some(rotated);
        self.last_action_was_rotate = true;
        self.lock_delay
            .refresh(self.config.lock_delay_ms, self.config.lock_reset_limit);
        true
    }

    /// Swap the active piece with the hold slot (once per lock)
    ///
    /// The held kind comes back as a fresh spawn. An empty slot takes the
    /// next piece from the queue instead.
    pub fn hold(&mut self) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };
        if !self.can_hold {
            return false;
        }

        match self.hold.replace(active.kind) {
            Some(held) => {
                self.place_fresh(held, HOLD_DEFEAT);
            }
            None => {
                self.spawn_piece();
            }
        }

        self.can_hold = false;
        true
    }

    /// Fire the Force ability: erase the fullest row
    pub fn activate_force(&mut self) -> ForceOutcome {
        if !self.force.ready() || self.game_over() {
            return ForceOutcome::default();
        }

        let mut outcome = ForceOutcome {
            used: true,
            ..ForceOutcome::default()
        };

        match self.board.fullest_row() {
            Some((row, _)) => {
                self.board.remove_row(row);
                self.lines += 1;
                self.level = calculate_level(self.lines);
                let bonus = calculate_force_blast_bonus(self.level);
                self.score = self.score.saturating_add(bonus);
                outcome.cleared_row = Some(row);
                outcome.score_bonus = bonus;
                self.events.push("Force blast successful. Enemy lane erased.");
            }
            None => {
                self.events
                    .push("Force pulse discharged. No hostile lane found.");
            }
        }

        // A blast is not a clear: streaks end here
        self.force.discharge();
        self.combo = -1;
        self.back_to_back = false;
        outcome
    }

    /// Apply a game action; true if it took effect
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::SoftDrop => self.soft_drop().moved,
            GameAction::HardDrop => self.hard_drop().locked,
            GameAction::RotateCw => self.rotate(true),
            GameAction::RotateCcw => self.rotate(false),
            GameAction::Hold => self.hold(),
            GameAction::Pause => {
                let before = self.status;
                self.toggle_pause();
                self.status != before
            }
            GameAction::Restart => {
                self.start(None);
                true
            }
            GameAction::ActivateForce => self.activate_force().used,
        }
    }

    // ---- time ----

    /// Advance timers by `elapsed_ms`: lock delay countdown, or gravity
    ///
    /// Gravity never locks by itself; a blocked gravity step arms the lock
    /// delay, and only an expired delay (or exhausted resets) locks.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickOutcome {
        if self.controllable().is_none() {
            return TickOutcome::default();
        }

        if self.lock_delay.is_active() {
            self.lock_delay.advance(elapsed_ms);
            if !self.is_grounded() {
                // The surface went away underneath the piece
                self.lock_delay.disarm();
            } else if self.lock_delay.should_lock(self.config.lock_reset_limit) {
                let lock = self.lock_piece();
                return TickOutcome {
                    moved: false,
                    locked: true,
                    lock,
                };
            }
            // No gravity while resting
            return TickOutcome::default();
        }

        self.gravity_ms = self.gravity_ms.saturating_add(elapsed_ms);
        let interval = self.drop_interval_ms();
        let mut moved = false;

        while self.gravity_ms >= interval {
            self.gravity_ms -= interval;
            let Some(active) = self.active else {
                break;
            };

            let lowered = active.shifted(0, 1);
            if self.collides(&lowered) {
                self.lock_delay.arm(self.config.lock_delay_ms);
                break;
            }

            self.active = Some(lowered);
            moved = true;
        }

        TickOutcome {
            moved,
            ..TickOutcome::default()
        }
    }

    // ---- lock sequence ----

    /// Spawn the next queued piece. On a blocked spawn the session is lost.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.piece_queue.next_kind();
        self.place_fresh(kind, SPAWN_DEFEAT)
    }

    /// Lock the active piece: detect spin, merge, clear rows, score, spawn
    pub fn lock_piece(&mut self) -> Option<LockOutcome> {
        let active = self.active.take()?;

        // Corners must be judged before the piece's own cells land
        let spin_eligible = self.spin_eligible(&active);

        self.board
            .merge(&active.matrix, active.x, active.y, active.kind);
        let cleared_rows = self.board.clear_full_rows();
        let cleared = cleared_rows.len();

        self.last_spin = spin_eligible.then(|| SpinKind::from_lines(cleared));
        self.apply_line_clear(cleared);

        self.lock_delay.disarm();
        self.can_hold = true;
        self.gravity_ms = 0;

        let spawned = self.spawn_piece();
        Some(LockOutcome {
            cleared_rows,
            spawned,
            spin: self.last_spin,
        })
    }

    /// Score a lock that cleared `cleared` rows, using the current spin marker
    pub fn apply_line_clear(&mut self, cleared: usize) {
        let spin = self.last_spin;

        if cleared == 0 {
            self.combo = -1;
            if spin.is_some() {
                let bonus = calculate_tspin_no_line_score(self.level);
                self.score = self.score.saturating_add(bonus);
                self.events.push(format!("T-SPIN MINI! +{bonus} points."));
            }
            return;
        }

        self.combo += 1;
        let result = calculate_score(cleared, self.level, spin, self.combo, self.back_to_back);

        self.score = self.score.saturating_add(result.total);
        self.lines += cleared as u32;
        self.level = calculate_level(self.lines);
        self.back_to_back = result.difficult;

        self.events.push(describe_clear(cleared, spin, &result));
        self.add_force(calculate_clear_charge(cleared, spin, self.combo));
    }

    // ---- internals ----

    /// The active piece, if intents are accepted right now
    fn controllable(&self) -> Option<Tetromino> {
        if self.status != SessionStatus::Running {
            return None;
        }
        self.active
    }

    fn collides(&self, piece: &Tetromino) -> bool {
        self.board.collides(&piece.matrix, piece.x, piece.y)
    }

    /// Rows the piece can fall before resting
    fn drop_distance(&self, piece: &Tetromino) -> u32 {
        let mut distance: i8 = 0;
        while !self.collides(&piece.shifted(0, distance + 1)) {
            distance += 1;
        }
        distance as u32
    }

    /// Put a fresh piece of `kind` in play, or lose the session if it doesn't fit
    fn place_fresh(&mut self, kind: PieceKind, defeat_message: &str) -> bool {
        let piece = Tetromino::spawn(kind);
        self.lock_delay.disarm();
        self.last_action_was_rotate = false;

        if self.collides(&piece) {
            self.active = None;
            self.status = SessionStatus::Defeat;
            self.events.push(defeat_message);
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// T piece, last action a rotation, and at least 3 of the 4 corners
    /// around its centre blocked
    fn spin_eligible(&self, piece: &Tetromino) -> bool {
        if piece.kind != PieceKind::T || !self.last_action_was_rotate {
            return false;
        }

        let (cx, cy) = (piece.x + 1, piece.y + 1);
        let blocked = T_CORNERS
            .iter()
            .filter(|&&(dx, dy)| self.board.is_blocked(cx + dx, cy + dy))
            .count();
        blocked >= 3
    }

    fn add_force(&mut self, amount: f64) {
        if self.force.charge(amount) {
            self.events
                .push("Force ability charged. Blast a hostile lane when ready.");
        }
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

fn describe_clear(lines: usize, spin: Option<SpinKind>, result: &ScoreResult) -> String {
    let headline = match (lines, spin.is_some()) {
        (4, _) => "TETRIS complete. Fleet formation perfect.",
        (1, true) => "T-SPIN SINGLE!",
        (2, true) => "T-SPIN DOUBLE!",
        (3, true) => "T-SPIN TRIPLE!",
        (1, false) => "Single line secured.",
        (2, false) => "Double strike achieved.",
        (3, false) => "Triple barrage successful.",
        _ => "Battlefield stabilized.",
    };

    let mut message = format!("{headline} +{} points.", result.total);
    if result.combo_bonus > 0 {
        message.push_str(&format!(" Combo bonus +{}.", result.combo_bonus));
    }
    if result.back_to_back_bonus > 0 {
        message.push_str(&format!(
            " Back-to-back bonus +{}.",
            result.back_to_back_bonus
        ));
    }
    message
}
