use core::ops::RangeInclusive;
use rand::prelude::*;

/// How often the torch re-rolls its radius, in milliseconds.
pub(crate) const TORCH_TICK_MS: u32 = 150;

const INITIAL_RADIUS: u32 = 150;
const FLICKER_RADIUS: RangeInclusive<u32> = 120..=140;
const REVEAL_STEP: u32 = 120;
const REVEAL_MAXED_AT: u32 = 5000;

#[derive(Copy, Clone, Debug, PartialEq)]
enum TorchPhase {
    Flickering,
    Revealing,
    Done,
}

/// Darkness overlay state for hard mode. While the board is in play the
/// radius jitters around the pointer; once the board completes the circle
/// grows until the whole screen is lit and the driver reports done.
#[derive(Clone, Debug)]
pub(crate) struct Torch {
    rng: SmallRng,
    radius: u32,
    phase: TorchPhase,
}

impl Torch {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            radius: INITIAL_RADIUS,
            phase: TorchPhase::Flickering,
        }
    }

    pub(crate) fn radius(&self) -> u32 {
        self.radius
    }

    pub(crate) fn is_done(&self) -> bool {
        matches!(self.phase, TorchPhase::Done)
    }

    /// Switches the torch from flickering to the one-shot growth that lights
    /// the finished board. Has no effect once the growth has started.
    pub(crate) fn begin_reveal(&mut self) {
        if matches!(self.phase, TorchPhase::Flickering) {
            self.phase = TorchPhase::Revealing;
        }
    }

    pub(crate) fn tick(&mut self) {
        match self.phase {
            TorchPhase::Flickering => self.radius = self.rng.random_range(FLICKER_RADIUS),
            TorchPhase::Revealing if self.radius > REVEAL_MAXED_AT => {
                self.phase = TorchPhase::Done;
            }
            TorchPhase::Revealing => self.radius += REVEAL_STEP,
            TorchPhase::Done => {}
        }
    }

    /// Inline style for the fullscreen overlay, a transparent circle at the
    /// pointer fading into near-black. The circle edge stays blurred until
    /// completion.
    pub(crate) fn overlay_style(&self, pointer: (i32, i32), completed: bool) -> String {
        let (x, y) = pointer;
        let radius = self.radius;
        let filter = if completed { "none" } else { "blur(20px)" };
        format!(
            "background: radial-gradient(circle {radius}px at {x}px {y}px, \
             rgba(0,0,0,0) 0%, rgba(0,0,0,0.3) 30%, rgba(0,0,0,0.6) 60%, \
             rgba(0,0,0,0.85) 85%, rgba(0,0,0,0.95) 100%); filter: {filter};"
        )
    }
}
