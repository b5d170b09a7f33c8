#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use messages::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod error;
mod game;
mod generator;
mod messages;
mod session;
mod types;
mod view;

/// Rules of a mission. The defaults are the standard high-risk mission.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MissionConfig {
    pub size: Coord2,
    pub bomb_probability: f64,
    pub flag_score: u32,
    /// Extra points per safe reveal already in the current streak.
    pub streak_bonus: u32,
    pub completion_bonus: u32,
    pub bomb_reveal_delay_ms: u32,
}

impl MissionConfig {
    pub const DEFAULT_SIZE: Coord2 = (6, 6);
    pub const DEFAULT_BOMB_PROBABILITY: f64 = 0.35;

    pub fn new((rows, cols): Coord2, bomb_probability: f64) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        Self {
            size: (rows, cols),
            bomb_probability: sanitize_probability(bomb_probability),
            ..Default::default()
        }
    }

    /// `bomb_probability` as a valid Bernoulli parameter, whatever the field was set to.
    pub fn effective_bomb_probability(&self) -> f64 {
        sanitize_probability(self.bomb_probability)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

fn sanitize_probability(p: f64) -> f64 {
    if p.is_nan() {
        MissionConfig::DEFAULT_BOMB_PROBABILITY
    } else {
        p.clamp(0.0, 1.0)
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            bomb_probability: Self::DEFAULT_BOMB_PROBABILITY,
            flag_score: 25,
            streak_bonus: 15,
            completion_bonus: 500,
            bomb_reveal_delay_ms: 500,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Safe,
    HitBomb,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Safe => true,
            HitBomb => true,
            Won => true,
        }
    }
}
