use flag_rescue_core::CellView;
use rand::prelude::*;

const FLAG_GLYPHS: [&str; 6] = ["🏁", "🎌", "🏴", "🏳️", "🚩", "⛳️"];
const HIDDEN_GLYPHS: [&str; 5] = ["❓", "❔", "⬜️", "⬛️", "▢"];
const BOMB_GLYPH: &str = "💥";

/// Cosmetic only, drawn fresh on every render.
pub(crate) fn glyph_for<R: Rng + ?Sized>(cell: CellView, rng: &mut R) -> &'static str {
    match cell {
        CellView::Hidden => pick(&HIDDEN_GLYPHS, rng),
        CellView::Flag => pick(&FLAG_GLYPHS, rng),
        CellView::Bomb => BOMB_GLYPH,
    }
}

fn pick<R: Rng + ?Sized>(glyphs: &[&'static str], rng: &mut R) -> &'static str {
    glyphs[rng.random_range(0..glyphs.len())]
}
