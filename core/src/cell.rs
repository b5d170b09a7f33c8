use serde::{Deserialize, Serialize};

/// What a cell secretly holds, fixed when the board is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Flag,
    Bomb,
}

impl CellKind {
    pub const fn is_flag(self) -> bool {
        matches!(self, Self::Flag)
    }

    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb)
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Flag
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    kind: CellKind,
    revealed: bool,
}

impl Cell {
    pub const fn hidden(kind: CellKind) -> Self {
        Self {
            kind,
            revealed: false,
        }
    }

    pub const fn kind(self) -> CellKind {
        self.kind
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    /// The kind, but only once the cell has been revealed.
    pub const fn visible_kind(self) -> Option<CellKind> {
        if self.revealed { Some(self.kind) } else { None }
    }

    /// Returns whether the cell was hidden before this call.
    pub(crate) fn reveal(&mut self) -> bool {
        !core::mem::replace(&mut self.revealed, true)
    }
}

impl From<CellKind> for Cell {
    fn from(kind: CellKind) -> Self {
        Self::hidden(kind)
    }
}
