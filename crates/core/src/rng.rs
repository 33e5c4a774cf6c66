//! RNG module - piece spawning
//!
//! Every spawn is an independent uniform draw over the 7-shape catalog: there is
//! no bag and no anti-repeat rule, so the same shape can appear twice in a row.
//!
//! Also provides a simple LCG so that a seed reproduces a whole game, and a
//! scripted source for tests and replays.

use crate::pieces::Piece;
use crate::types::ShapeKind;

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

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

#[derive(Debug, Clone)]
enum Source {
    Random(SimpleRng),
    Scripted { kinds: Vec<ShapeKind>, index: usize },
}

/// Produces the next active piece
#[derive(Debug, Clone)]
pub struct Spawner {
    source: Source,
    seed: u32,
}

impl Spawner {
    /// Uniform random spawner driven by a seed
    pub fn seeded(seed: u32) -> Self {
        Self {
            source: Source::Random(SimpleRng::new(seed)),
            seed,
        }
    }

    /// Spawner that cycles through a fixed list of shapes.
    ///
    /// An empty list falls back to the catalog order.
    pub fn scripted(kinds: Vec<ShapeKind>) -> Self {
        let kinds = if kinds.is_empty() {
            ShapeKind::ALL.to_vec()
        } else {
            kinds
        };
        Self {
            source: Source::Scripted { kinds, index: 0 },
            seed: 0,
        }
    }

    /// Seed used by a random spawner (0 for scripted)
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Draw the next shape kind
    pub fn next_kind(&mut self) -> ShapeKind {
        match &mut self.source {
            Source::Random(rng) => {
                let i = rng.next_range(ShapeKind::ALL.len() as u32) as usize;
                ShapeKind::ALL[i]
            }
            Source::Scripted { kinds, index } => {
                let kind = kinds[*index % kinds.len()];
                *index = (*index + 1) % kinds.len();
                kind
            }
        }
    }

    /// Draw the next piece, positioned at the spawn point
    pub fn next(&mut self) -> Piece {
        Piece::spawn(self.next_kind())
    }
}
