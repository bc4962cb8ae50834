use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Generation strategy that uniformly samples the face pool, doubles every
/// sampled face, and lays the deck out in shuffle order.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    face_pool: Vec<FaceId>,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, face_pool: impl Into<Vec<FaceId>>) -> Self {
        Self {
            seed,
            face_pool: face_pool.into(),
        }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<CardLayout> {
        use rand::prelude::*;

        let total_cards = config.total_cards();
        if total_cards % 2 != 0 {
            return Err(GameError::OddCardCount);
        }
        let pair_count = usize::from(total_cards / 2);
        if self.face_pool.len() < pair_count {
            log::warn!(
                "Face pool holds {} faces but the board needs {}",
                self.face_pool.len(),
                pair_count
            );
            return Err(GameError::NotEnoughFaces);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut deck: Vec<FaceId> = self
            .face_pool
            .choose_multiple(&mut rng, pair_count)
            .flat_map(|&face| [face, face])
            .collect();
        deck.shuffle(&mut rng);

        let card_grid = Array2::from_shape_vec(config.size().to_nd_index(), deck)
            .map_err(|_| GameError::InvalidBoardShape)?;
        let layout = CardLayout::from_card_grid(card_grid)?;
        log::debug!(
            "Generated a {0}x{0} layout with {1} distinct faces",
            config.side,
            layout.face_count()
        );
        Ok(layout)
    }
}
