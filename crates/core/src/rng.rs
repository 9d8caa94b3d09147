//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, J, L, O, S, T, Z), shuffled.
//! Pieces are dealt from the bag until it is empty, then a new bag is shuffled.
//!
//! The random source is injected: anything yielding uniform `[0, 1)` values
//! works, so tests can script exact bag orders.

use crate::types::{PieceKind, NEXT_QUEUE_LEN};
use arrayvec::ArrayVec;

/// Uniform `[0, 1)` random number source
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// Random source backed by a closure, e.g. a scripted sequence in tests
///
/// Values outside `[0, 1)` are clamped into range.
#[derive(Clone)]
pub struct FnRandom<F>(pub F);

impl<F: FnMut() -> f64> RandomSource for FnRandom<F> {
    fn next_unit(&mut self) -> f64 {
        (self.0)().clamp(0.0, 1.0 - f64::EPSILON)
    }
}

impl<F> std::fmt::Debug for FnRandom<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnRandom(..)")
    }
}

/// Random source backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RandRandom<R>(pub R);

impl RandRandom<rand::rngs::ThreadRng> {
    /// Thread-local OS-seeded generator, for casual play
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl<R: rand::RngCore> RandomSource for RandRandom<R> {
    fn next_unit(&mut self) -> f64 {
        use rand::Rng;
        self.0.gen::<f64>()
    }
}

/// Fisher-Yates shuffle of a fresh bag in canonical order
fn shuffled_bag(random: &mut impl RandomSource) -> ArrayVec<PieceKind, 7> {
    let mut bag: ArrayVec<PieceKind, 7> = PieceKind::ALL.into_iter().collect();
    for i in (1..bag.len()).rev() {
        let j = ((random.next_unit() * (i + 1) as f64) as usize).min(i);
        bag.swap(i, j);
    }
    bag
}

/// 7-bag piece generator with a visible next queue
///
/// The queue holds at least [`NEXT_QUEUE_LEN`] upcoming kinds; the bag holds
/// the shuffled kinds not yet queued. Kinds are dealt from the end of the bag.
#[derive(Debug, Clone)]
pub struct PieceQueue<R = SimpleRng> {
    queue: ArrayVec<PieceKind, { NEXT_QUEUE_LEN + 1 }>,
    bag: ArrayVec<PieceKind, 7>,
    random: R,
}

impl PieceQueue<SimpleRng> {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        Self::with_random(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> PieceQueue<R> {
    /// Create a queue drawing from `random`, pre-filled to the preview length
    pub fn with_random(random: R) -> Self {
        let mut queue = Self {
            queue: ArrayVec::new(),
            bag: ArrayVec::new(),
            random,
        };
        queue.ensure(NEXT_QUEUE_LEN);
        queue
    }

    /// Top the queue up to `len` kinds, shuffling a new bag whenever the
    /// current one runs out
    pub fn ensure(&mut self, len: usize) {
        let len = len.min(self.queue.capacity());
        while self.queue.len() < len {
            if self.bag.is_empty() {
                self.bag = shuffled_bag(&mut self.random);
            }
            if let Some(kind) = self.bag.pop() {
                self.queue.push(kind);
            }
        }
    }

    /// Take the next kind and refill the preview
    pub fn next_kind(&mut self) -> PieceKind {
        self.ensure(1);
        let kind = self.queue.remove(0);
        self.ensure(NEXT_QUEUE_LEN);
        kind
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<PieceKind> {
        self.queue.first().copied()
    }

    /// The next 5 kinds.
    ///
    /// This is stack-only and does not allocate.
    pub fn preview(&self) -> [PieceKind; NEXT_QUEUE_LEN] {
        let mut out = [PieceKind::I; NEXT_QUEUE_LEN];
        for (slot, kind) in out.iter_mut().zip(self.queue.iter()) {
            *slot = *kind;
        }
        out
    }

    /// Number of queued kinds
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Kinds left in the current bag
    pub fn bag_remaining(&self) -> usize {
        self.bag.len()
    }

    /// Drop queued and bagged kinds and deal a fresh preview from the same source
    pub fn reset(&mut self) {
        self.queue.clear();
        self.bag.clear();
        self.ensure(NEXT_QUEUE_LEN);
    }
}

impl Default for PieceQueue<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
