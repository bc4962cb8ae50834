use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    InProgress,
    Completed,
}

impl EngineState {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Bounded buffer for the positions currently lying face up mid-attempt.
/// Pushing into a full buffer displaces both occupants and keeps only the
/// new position; membership does not exempt a full buffer from the reset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealBuffer {
    first: Option<Coord2>,
    second: Option<Coord2>,
}

impl RevealBuffer {
    pub const CAPACITY: usize = 2;

    pub fn push(&mut self, coords: Coord2) -> Option<(Coord2, Coord2)> {
        match (self.first, self.second) {
            (Some(displaced_a), Some(displaced_b)) => {
                self.first = Some(coords);
                self.second = None;
                Some((displaced_a, displaced_b))
            }
            _ if self.contains(coords) => None,
            (None, _) => {
                self.first = Some(coords);
                None
            }
            (Some(_), None) => {
                self.second = Some(coords);
                None
            }
        }
    }

    pub fn take(&mut self) -> impl Iterator<Item = Coord2> + use<> {
        [self.first.take(), self.second.take()]
            .into_iter()
            .flatten()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.first == Some(coords) || self.second == Some(coords)
    }

    pub fn len(&self) -> usize {
        self.first.iter().count() + self.second.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEngine {
    card_layout: CardLayout,
    board: Array2<CardState>,
    face_up: RevealBuffer,
    pending_reveal: Option<(Coord2, FaceId)>,
    matched_count: Saturating<CellCount>,
    click_count: Saturating<u32>,
    elapsed_secs: Saturating<u32>,
    state: EngineState,
}

impl MatchEngine {
    pub fn new(card_layout: CardLayout) -> Self {
        let size = card_layout.size();
        Self {
            card_layout,
            board: Array2::default(size.to_nd_index()),
            face_up: RevealBuffer::default(),
            pending_reveal: None,
            matched_count: Saturating(0),
            click_count: Saturating(0),
            elapsed_secs: Saturating(0),
            state: Default::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    pub fn side(&self) -> Coord {
        self.card_layout.size().0
    }

    pub fn total_cards(&self) -> CellCount {
        self.card_layout.total_cards()
    }

    pub fn matched_cards(&self) -> CellCount {
        self.matched_count.0
    }

    pub fn click_count(&self) -> u32 {
        self.click_count.0
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs.0
    }

    pub fn spent_time(&self) -> SpentTime {
        SpentTime::from_total_secs(self.elapsed_secs.0)
    }

    pub fn card_at(&self, coords: Coord2) -> CardState {
        self.board[coords.to_nd_index()]
    }

    pub fn face_at(&self, coords: Coord2) -> FaceId {
        self.card_layout[coords]
    }

    pub fn pending_reveal(&self) -> Option<(Coord2, FaceId)> {
        self.pending_reveal
    }

    /// Processes one click on the board. Out-of-bounds coordinates are
    /// rejected without counting; every in-bounds click counts, including
    /// re-clicks of face-up or matched cards.
    pub fn click(&mut self, coords: Coord2) -> Result<ClickOutcome> {
        let coords = self.card_layout.validate_coords(coords)?;
        let face = self.card_layout[coords];
        self.click_count += 1;

        match self.pending_reveal.take() {
            Some((pending_coords, pending_face)) if pending_face == face => {
                Ok(self.resolve_match(pending_coords, coords))
            }
            _ => Ok(self.reveal_card(coords, face)),
        }
    }

    /// Advances the session clock by one second while the board is still in
    /// play. Once completed the clock freezes for good.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.is_completed() {
            TickOutcome::Frozen
        } else {
            self.elapsed_secs += 1;
            TickOutcome::Advanced
        }
    }

    fn resolve_match(&mut self, first: Coord2, second: Coord2) -> ClickOutcome {
        for pos in self.face_up.take() {
            if matches!(self.board[pos.to_nd_index()], CardState::FaceUp) {
                self.board[pos.to_nd_index()] = CardState::FaceDown;
            }
        }

        self.board[first.to_nd_index()] = CardState::Matched;
        self.board[second.to_nd_index()] = CardState::Matched;
        self.matched_count += 2;
        log::debug!(
            "matched {:?} with {:?} ({}/{} cards)",
            first,
            second,
            self.matched_count.0,
            self.total_cards()
        );

        if self.state.is_in_progress() && self.matched_count.0 >= self.total_cards() {
            self.state = EngineState::Completed;
            log::debug!("board completed after {} clicks", self.click_count.0);
            ClickOutcome::Completed
        } else {
            ClickOutcome::Matched
        }
    }

    fn reveal_card(&mut self, coords: Coord2, face: FaceId) -> ClickOutcome {
        if let Some((displaced_a, displaced_b)) = self.face_up.push(coords) {
            for pos in [displaced_a, displaced_b] {
                if matches!(self.board[pos.to_nd_index()], CardState::FaceUp) {
                    self.board[pos.to_nd_index()] = CardState::FaceDown;
                }
            }
        }

        if matches!(self.board[coords.to_nd_index()], CardState::FaceDown) {
            self.board[coords.to_nd_index()] = CardState::FaceUp;
        }
        self.pending_reveal = Some((coords, face));
        log::trace!("revealed {:?} awaiting a partner", coords);
        ClickOutcome::Revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn layout(side: Coord, faces: &[FaceId]) -> CardLayout {
        CardLayout::from_faces((side, side), faces).unwrap()
    }

    fn two_by_two() -> MatchEngine {
        // (0, 0) pairs with (1, 0) as face 7, (0, 1) with (1, 1) as face 8
        MatchEngine::new(layout(2, &[7, 8, 7, 8]))
    }

    #[test]
    fn every_in_bounds_click_counts() {
        let mut engine = two_by_two();

        engine.click((0, 0)).unwrap();
        engine.click((0, 0)).unwrap();
        engine.click((0, 1)).unwrap();

        assert_eq!(engine.click_count(), 3);
    }

    #[test]
    fn out_of_bounds_click_is_rejected_without_counting() {
        let mut engine = two_by_two();

        assert_eq!(engine.click((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(engine.click((0, 2)), Err(GameError::InvalidCoords));
        assert_eq!(engine.click_count(), 0);
        assert_eq!(engine.card_at((0, 0)), CardState::FaceDown);
    }

    #[test]
    fn matching_pair_locks_both_cards() {
        let mut engine = two_by_two();

        assert_eq!(engine.click((0, 0)).unwrap(), ClickOutcome::Revealed);
        assert_eq!(engine.pending_reveal(), Some(((0, 0), 7)));
        assert_eq!(engine.click((1, 0)).unwrap(), ClickOutcome::Matched);

        assert_eq!(engine.card_at((0, 0)), CardState::Matched);
        assert_eq!(engine.card_at((1, 0)), CardState::Matched);
        assert_eq!(engine.matched_cards(), 2);
        assert_eq!(engine.pending_reveal(), None);
    }

    #[test]
    fn mismatched_pair_stays_face_up_until_the_next_click() {
        let mut engine = two_by_two();

        engine.click((0, 0)).unwrap();
        assert_eq!(engine.click((0, 1)).unwrap(), ClickOutcome::Revealed);

        assert_eq!(engine.card_at((0, 0)), CardState::FaceUp);
        assert_eq!(engine.card_at((0, 1)), CardState::FaceUp);
        assert_eq!(engine.pending_reveal(), Some(((0, 1), 8)));
    }

    #[test]
    fn third_click_flips_a_stale_mismatch_back_down() {
        let mut engine = two_by_two();

        engine.click((0, 0)).unwrap();
        engine.click((0, 1)).unwrap();
        assert_eq!(engine.click((1, 0)).unwrap(), ClickOutcome::Revealed);

        assert_eq!(engine.card_at((0, 0)), CardState::FaceDown);
        assert_eq!(engine.card_at((0, 1)), CardState::FaceDown);
        assert_eq!(engine.card_at((1, 0)), CardState::FaceUp);
        assert_eq!(engine.pending_reveal(), Some(((1, 0), 7)));
    }

    #[test]
    fn reclicking_a_mismatched_card_flips_only_the_other_one_down() {
        let mut engine = two_by_two();

        engine.click((0, 0)).unwrap();
        engine.click((0, 1)).unwrap();
        assert_eq!(engine.click((0, 0)).unwrap(), ClickOutcome::Revealed);

        assert_eq!(engine.card_at((0, 0)), CardState::FaceUp);
        assert_eq!(engine.card_at((0, 1)), CardState::FaceDown);
        assert_eq!(engine.pending_reveal(), Some(((0, 0), 7)));
    }

    #[test]
    fn match_flips_a_stale_third_card_back_down() {
        let mut engine = two_by_two();

        engine.click((0, 0)).unwrap();
        engine.click((0, 1)).unwrap();
        engine.click((1, 1)).unwrap();

        assert_eq!(engine.card_at((0, 1)), CardState::Matched);
        assert_eq!(engine.card_at((1, 1)), CardState::Matched);
        assert_eq!(engine.card_at((0, 0)), CardState::FaceDown);
    }

    #[test]
    fn completion_latches_exactly_once() {
        let mut engine = two_by_two();

        assert_eq!(engine.click((0, 0)).unwrap(), ClickOutcome::Revealed);
        assert_eq!(engine.click((1, 0)).unwrap(), ClickOutcome::Matched);
        assert_eq!(engine.click((0, 1)).unwrap(), ClickOutcome::Revealed);
        assert_eq!(engine.click((1, 1)).unwrap(), ClickOutcome::Completed);
        assert_eq!(engine.state(), EngineState::Completed);

        // re-matching an already matched pair must not fire Completed again
        assert_eq!(engine.click((0, 0)).unwrap(), ClickOutcome::Revealed);
        assert_eq!(engine.click((1, 0)).unwrap(), ClickOutcome::Matched);
        assert!(engine.is_completed());
        assert_eq!(engine.matched_cards(), 6);
    }

    #[test]
    fn clicking_one_card_twice_matches_it_with_itself() {
        let mut engine = two_by_two();

        engine.click((0, 0)).unwrap();
        assert_eq!(engine.click((0, 0)).unwrap(), ClickOutcome::Matched);

        assert_eq!(engine.card_at((0, 0)), CardState::Matched);
        assert_eq!(engine.card_at((1, 0)), CardState::FaceDown);
        assert_eq!(engine.matched_cards(), 2);
    }

    #[test]
    fn clock_ticks_until_completion_then_freezes() {
        let mut engine = two_by_two();

        assert_eq!(engine.tick(), TickOutcome::Advanced);
        assert_eq!(engine.tick(), TickOutcome::Advanced);
        assert_eq!(engine.elapsed_secs(), 2);

        engine.click((0, 0)).unwrap();
        engine.click((1, 0)).unwrap();
        engine.click((0, 1)).unwrap();
        engine.click((1, 1)).unwrap();
        assert!(engine.is_completed());

        assert_eq!(engine.tick(), TickOutcome::Frozen);
        assert_eq!(engine.elapsed_secs(), 2);
        assert_eq!(engine.spent_time(), SpentTime::from_total_secs(2));
    }

    #[test]
    fn reveal_buffer_displaces_both_occupants_when_full() {
        let mut buffer = RevealBuffer::default();

        assert_eq!(buffer.push((0, 0)), None);
        assert_eq!(buffer.push((1, 0)), None);
        assert_eq!(buffer.len(), RevealBuffer::CAPACITY);

        assert_eq!(buffer.push((1, 1)), Some(((0, 0), (1, 0))));
        assert_eq!(buffer.len(), 1);
        assert!(buffer.contains((1, 1)));
        assert!(!buffer.contains((0, 0)));

        // a present position is only a no-op while the buffer has room
        assert_eq!(buffer.push((1, 1)), None);
        assert_eq!(buffer.len(), 1);

        // a full buffer resets even when the push target is an occupant
        assert_eq!(buffer.push((0, 1)), None);
        assert_eq!(buffer.push((1, 1)), Some(((1, 1), (0, 1))));
        assert_eq!(buffer.len(), 1);
        assert!(buffer.contains((1, 1)));
        assert!(!buffer.contains((0, 1)));

        let drained: Vec<_> = buffer.take().collect();
        assert_eq!(drained, [(1, 1)]);
        assert!(buffer.is_empty());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn a_full_session_plays_out_in_the_browser() {
        let layout = CardLayout::from_faces((2, 2), &[7, 8, 7, 8]).unwrap();
        let mut engine = MatchEngine::new(layout);

        assert_eq!(engine.tick(), TickOutcome::Advanced);
        engine.click((0, 0)).unwrap();
        engine.click((1, 0)).unwrap();
        engine.click((0, 1)).unwrap();
        assert_eq!(engine.click((1, 1)).unwrap(), ClickOutcome::Completed);
        assert_eq!(engine.tick(), TickOutcome::Frozen);
    }
}
