use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the gameplay engine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardState {
    FaceDown,
    FaceUp,
    Matched,
}

impl CardState {
    pub const fn shows_face(self) -> bool {
        matches!(self, Self::FaceUp | Self::Matched)
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self::FaceDown
    }
}
