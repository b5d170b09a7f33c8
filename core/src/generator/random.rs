use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Populates a board with one independent draw per cell, row-major. No guarantees are made about the composition: a
/// board of only bombs or only flags is legal.
pub fn generate_board<R: Rng + ?Sized>(rng: &mut R, config: &MissionConfig) -> Board {
    let (rows, cols) = config.size;
    let bomb_probability = config.effective_bomb_probability();

    let mut kinds: Array2<CellKind> = Array2::default(config.size.to_nd_index());
    for coords in iter_coords((rows, cols)) {
        if rng.random_bool(bomb_probability) {
            kinds[coords.to_nd_index()] = CellKind::Bomb;
        }
    }

    let board = match Board::from_kind_mask(kinds) {
        Ok(board) => board,
        Err(err) => {
            log::warn!("Invalid mission size {:?} ({}), fallback to default", config.size, err);
            return generate_board(rng, &MissionConfig::default());
        }
    };

    if board.flag_count() == 0 {
        log::warn!("Generated board has no flags, the first reveal will lose");
    } else if board.bomb_count() == 0 {
        log::warn!("Generated board has no bombs");
    }
    log::debug!(
        "Generated {}x{} board: {} flags, {} bombs",
        rows,
        cols,
        board.flag_count(),
        board.bomb_count()
    );

    board
}

/// Generation strategy backed by a seeded `SmallRng`, so a seed reproduces the same board.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: &MissionConfig) -> Board {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_board(&mut rng, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_produces_36_cells() {
        let board = RandomBoardGenerator::new(7).generate(&MissionConfig::default());

        assert_eq!(board.size(), (6, 6));
        assert_eq!(board.total_cells(), 36);
        assert_eq!(board.flag_count() + board.bomb_count(), 36);
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn same_seed_same_board() {
        let config = MissionConfig::default();
        let a = RandomBoardGenerator::new(1234).generate(&config);
        let b = RandomBoardGenerator::new(1234).generate(&config);

        assert_eq!(a, b);
    }

    #[test]
    fn probability_extremes_are_degenerate_boards() {
        let mut rng = SmallRng::seed_from_u64(0);

        let all_bombs = generate_board(&mut rng, &MissionConfig::new((6, 6), 1.0));
        assert_eq!(all_bombs.bomb_count(), 36);

        let all_flags = generate_board(&mut rng, &MissionConfig::new((6, 6), 0.0));
        assert_eq!(all_flags.flag_count(), 36);
    }

    #[test]
    fn nan_probability_falls_back_to_default() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut config = MissionConfig::default();
        config.bomb_probability = f64::NAN;

        let board = generate_board(&mut rng, &config);

        assert_eq!(board.total_cells(), 36);
    }

    #[test]
    fn bomb_share_is_roughly_the_configured_probability() {
        let mut rng = SmallRng::seed_from_u64(42);
        let config = MissionConfig::default();

        let bombs: u32 = (0..200)
            .map(|_| u32::from(generate_board(&mut rng, &config).bomb_count()))
            .sum();
        let share = f64::from(bombs) / f64::from(200 * 36);

        assert!((0.30..0.40).contains(&share), "bomb share {share}");
    }
}
