#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod card;
mod clock;
mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub side: Coord,
}

impl GameConfig {
    pub const MIN_SIDE: Coord = 2;
    pub const DEFAULT_SIDE: Coord = 4;

    pub const fn new_unchecked(side: Coord) -> Self {
        Self { side }
    }

    pub fn new(side: Coord) -> Self {
        // an odd side would leave one card without a partner
        let side = side.clamp(Self::MIN_SIDE, Coord::MAX - 1) & !1;
        Self::new_unchecked(side)
    }

    pub const fn size(&self) -> Coord2 {
        (self.side, self.side)
    }

    pub const fn total_cards(&self) -> CellCount {
        mult(self.side, self.side)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIDE)
    }
}

/// Immutable face placement for one session. Every face appears on exactly
/// two cells, which `from_card_grid` enforces up front.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    card_grid: Array2<FaceId>,
    face_count: CellCount,
}

impl CardLayout {
    pub fn from_card_grid(card_grid: Array2<FaceId>) -> Result<Self> {
        let (rows, cols) = card_grid.dim();
        if rows != cols || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }
        if card_grid.len() % 2 != 0 {
            return Err(GameError::OddCardCount);
        }

        let mut face_tally: BTreeMap<FaceId, CellCount> = BTreeMap::new();
        for &face in card_grid.iter() {
            *face_tally.entry(face).or_insert(0) += 1;
        }
        if face_tally.values().any(|&count| count != 2) {
            return Err(GameError::UnpairedFace);
        }

        let face_count = face_tally.len().try_into().unwrap();
        Ok(Self {
            card_grid,
            face_count,
        })
    }

    pub fn from_faces(size: Coord2, faces: &[FaceId]) -> Result<Self> {
        let card_grid = Array2::from_shape_vec(size.to_nd_index(), Vec::from(faces))
            .map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_card_grid(card_grid)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            side: self.size().0,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.card_grid.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cards(&self) -> CellCount {
        self.card_grid.len().try_into().unwrap()
    }

    pub fn face_count(&self) -> CellCount {
        self.face_count
    }

    pub fn face_at(&self, coords: Coord2) -> FaceId {
        self[coords]
    }
}

impl Index<Coord2> for CardLayout {
    type Output = FaceId;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.card_grid[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    Revealed,
    Matched,
    Completed,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Advanced,
    Frozen,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Advanced => true,
            Self::Frozen => false,
        }
    }
}
