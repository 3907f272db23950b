//! Fixed-step accumulator for host loops
//!
//! Hosts feed real elapsed time; the clock says how many `SIM_DT` steps to
//! run. Long stalls are clamped so the host never falls into a spiral of
//! catch-up frames.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dt` seconds and return how many fixed steps to run now
    ///
    /// At most `MAX_SUBSTEPS`; hitting the cap drops whatever is left over.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            if self.accumulator > 0.0 {
                log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            }
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Fraction of a step left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
