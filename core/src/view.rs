use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the player may see of a cell. Hidden cells carry no kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flag,
    Bomb,
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        match cell.visible_kind() {
            None => Self::Hidden,
            Some(CellKind::Flag) => Self::Flag,
            Some(CellKind::Bomb) => Self::Bomb,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndView {
    BombHit { message: BombMessage, final_score: u32 },
    Won { final_score: u32 },
}

impl EndView {
    pub fn headline(&self) -> &'static str {
        match self {
            Self::BombHit { message, .. } => message.as_str(),
            Self::Won { .. } => WIN_MESSAGE,
        }
    }

    pub fn final_score(&self) -> u32 {
        match *self {
            Self::BombHit { final_score, .. } | Self::Won { final_score } => final_score,
        }
    }
}

/// Snapshot handed to the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: Phase,
    pub briefing_visible: bool,
    pub mission: Option<MissionId>,
    pub rows: Vec<Vec<CellView>>,
    pub score: u32,
    pub saved_flags: CellCount,
    pub consecutive_safe: u32,
    pub end: Option<EndView>,
}

impl SessionView {
    pub fn new(game: &Game) -> Self {
        let Some(session) = game.session() else {
            return Self {
                phase: Phase::Briefing,
                briefing_visible: game.is_briefing_visible(),
                mission: None,
                rows: Vec::new(),
                score: 0,
                saved_flags: 0,
                consecutive_safe: 0,
                end: None,
            };
        };

        let rows = session
            .board()
            .rows()
            .map(|row| row.iter().map(|&cell| CellView::from(cell)).collect())
            .collect();
        let end = session.end_reason().map(|reason| match reason {
            EndReason::BombHit(message) => EndView::BombHit {
                message,
                final_score: session.score(),
            },
            EndReason::Won => EndView::Won {
                final_score: session.score(),
            },
        });

        Self {
            phase: session.phase(),
            briefing_visible: game.is_briefing_visible(),
            mission: Some(session.mission()),
            rows,
            score: session.score(),
            saved_flags: session.saved_flags(),
            consecutive_safe: session.consecutive_safe(),
            end,
        }
    }

    /// The streak counter is only worth showing from the second safe reveal on.
    pub fn streak_visible(&self) -> bool {
        self.consecutive_safe > 1
    }

    pub fn cell_at(&self, (row, col): Coord2) -> Option<CellView> {
        self.rows
            .get(usize::from(row))
            .and_then(|cells| cells.get(usize::from(col)))
            .copied()
    }
}
