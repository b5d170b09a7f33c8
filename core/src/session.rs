use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Identifies one mission within a [`Game`], so follow-ups from a replaced mission can be told apart.
pub type MissionId = u32;

/// Valid transitions:
/// - Briefing -> Playing
/// - Playing -> Ended
/// - Ended -> Playing (restart, always with a fresh session)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No mission started yet
    Briefing,
    Playing,
    Ended,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Briefing
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    BombHit(BombMessage),
    Won,
}

/// Work the caller must run later against the same [`Game`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowUp {
    /// Dispatch [`Intent::RevealBombs`] for `mission` once, after `delay_ms`.
    RevealBombs { mission: MissionId, delay_ms: u32 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub outcome: RevealOutcome,
    pub follow_up: Option<FollowUp>,
}

impl Transition {
    const fn unchanged() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            follow_up: None,
        }
    }

    const fn outcome(outcome: RevealOutcome) -> Self {
        Self {
            outcome,
            follow_up: None,
        }
    }
}

/// A single mission, from the first reveal to its end. Restarting replaces the whole session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: MissionConfig,
    mission: MissionId,
    board: Board,
    score: u32,
    saved_flags: CellCount,
    consecutive_safe: u32,
    phase: Phase,
    end_reason: Option<EndReason>,
    bomb_reveal_pending: bool,
}

impl GameSession {
    pub fn new(board: Board, config: MissionConfig, mission: MissionId) -> Self {
        Self {
            config,
            mission,
            board,
            score: 0,
            saved_flags: 0,
            consecutive_safe: 0,
            phase: Phase::Playing,
            end_reason: None,
            bomb_reveal_pending: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn mission(&self) -> MissionId {
        self.mission
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn saved_flags(&self) -> CellCount {
        self.saved_flags
    }

    pub fn consecutive_safe(&self) -> u32 {
        self.consecutive_safe
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn is_bomb_reveal_pending(&self) -> bool {
        self.bomb_reveal_pending
    }

    /// Reveals one cell. Anything that isn't a legal move is a `NoChange`, never an error.
    pub fn reveal<R: Rng + ?Sized>(&mut self, coords: Coord2, rng: &mut R) -> Transition {
        if !self.phase.is_playing() || self.bomb_reveal_pending {
            log::trace!("reveal {:?} ignored in {:?}", coords, self.phase);
            return Transition::unchanged();
        }

        let Ok(coords) = self.board.validate_coords(coords) else {
            log::trace!("reveal {:?} ignored, out of bounds", coords);
            return Transition::unchanged();
        };

        if !self.board.reveal(coords) {
            log::trace!("reveal {:?} ignored, already revealed", coords);
            return Transition::unchanged();
        }

        match self.board[coords].kind() {
            CellKind::Bomb => self.hit_bomb(coords, rng),
            CellKind::Flag => self.save_flag(coords),
        }
    }

    /// The deferred half of a bomb hit: uncovers every bomb, once. Score and counters are untouched.
    pub fn reveal_bombs(&mut self) -> bool {
        if !self.bomb_reveal_pending {
            return false;
        }

        self.bomb_reveal_pending = false;
        let revealed = self.board.reveal_bombs();
        log::debug!("mission {}: revealed {} remaining bombs", self.mission, revealed);
        true
    }

    fn hit_bomb<R: Rng + ?Sized>(&mut self, coords: Coord2, rng: &mut R) -> Transition {
        let message = BombMessage::pick(rng);
        self.end_reason = Some(EndReason::BombHit(message));
        self.phase = Phase::Ended;
        self.bomb_reveal_pending = true;
        log::debug!(
            "mission {}: bomb at {:?}, final score {}",
            self.mission,
            coords,
            self.score
        );

        Transition {
            outcome: RevealOutcome::HitBomb,
            follow_up: Some(FollowUp::RevealBombs {
                mission: self.mission,
                delay_ms: self.config.bomb_reveal_delay_ms,
            }),
        }
    }

    fn save_flag(&mut self, coords: Coord2) -> Transition {
        let bonus = self.consecutive_safe.saturating_mul(self.config.streak_bonus);
        self.score = self
            .score
            .saturating_add(self.config.flag_score)
            .saturating_add(bonus);
        self.consecutive_safe += 1;
        self.saved_flags += 1;
        log::trace!(
            "mission {}: flag at {:?}, streak {}, score {}",
            self.mission,
            coords,
            self.consecutive_safe,
            self.score
        );

        if self.saved_flags < self.board.flag_count() {
            return Transition::outcome(RevealOutcome::Safe);
        }

        self.score = self.score.saturating_add(self.config.completion_bonus);
        self.end_reason = Some(EndReason::Won);
        self.phase = Phase::Ended;
        self.board.reveal_all();
        log::debug!("mission {}: won, final score {}", self.mission, self.score);

        Transition::outcome(RevealOutcome::Won)
    }
}
