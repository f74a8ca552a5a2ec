//! Interaction state of a single tilt card.
//!
//! ```text
//! Idle --move--> Tracking --leave--> Returning --settled--> Idle
//!                    ^                   |
//!                    +-------move--------+
//! ```
//!
//! The card owns one spring per axis. Pointer events only retarget the
//! springs; motion happens in [`TiltCard::tick`], which the host calls once per
//! rendered frame while [`TiltCard::needs_frame`] is true.

use crate::config::TiltConfig;
use crate::normalize::{normalize, NormalizedOffset};
use crate::pointer::{sample_pointer, SurfaceBounds};
use crate::spring::SpringPair;
use crate::transform::{LayerTransform, TiltTransform};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Tracking,
    Returning,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome {
    pub phase: Phase,
    pub offset: NormalizedOffset,
    pub transform: TiltTransform,
    /// Springs reached their target; no further frames are needed.
    pub settled: bool,
}

#[derive(Clone, Debug)]
pub struct TiltCard {
    config: TiltConfig,
    springs: SpringPair,
    phase: Phase,
}

impl TiltCard {
    pub fn new(config: TiltConfig) -> Self {
        let springs = SpringPair::new(config.spring);
        Self {
            config,
            springs,
            phase: Phase::Idle,
        }
    }

    #[inline]
    pub fn config(&self) -> &TiltConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn springs(&self) -> &SpringPair {
        &self.springs
    }

    /// The offset the springs are currently heading for.
    pub fn target(&self) -> NormalizedOffset {
        NormalizedOffset::from(self.springs.target())
    }

    /// Smoothed offset, clamped to the normalized range.
    pub fn offset(&self) -> NormalizedOffset {
        NormalizedOffset::from(self.springs.value())
    }

    pub fn transform(&self) -> TiltTransform {
        TiltTransform::from_offset(self.offset().as_vec2(), self.config.max_deg)
    }

    pub fn layer_transforms(&self) -> impl Iterator<Item = LayerTransform> + '_ {
        let offset = self.offset().as_vec2();
        let gain = self.config.layer_shift;
        self.config
            .layers
            .iter()
            .map(move |layer| layer.transform(offset, gain))
    }

    /// True while the springs are moving and the host should keep ticking.
    #[inline]
    pub fn needs_frame(&self) -> bool {
        !self.springs.is_at_rest()
    }

    /// Pointer moved over the surface. `bounds` is re-read by the host for
    /// every event and is `None` when the surface is not mounted.
    ///
    /// Unusable samples (unmounted or zero-sized surface) leave the card
    /// untouched. Returns whether frames are needed.
    pub fn pointer_move(
        &mut self,
        client_x: f32,
        client_y: f32,
        bounds: Option<SurfaceBounds>,
    ) -> bool {
        let Some((sample, bounds)) = sample_pointer(client_x, client_y, bounds) else {
            return self.needs_frame();
        };
        match normalize(sample, &bounds, self.config.normalization) {
            Some(offset) => self.track(offset),
            None => self.needs_frame(),
        }
    }

    /// Aim the card at an already normalized offset.
    pub fn track(&mut self, offset: NormalizedOffset) -> bool {
        if self.phase != Phase::Tracking {
            log::trace!("[tilt] {:?} -> Tracking", self.phase);
            self.phase = Phase::Tracking;
        }
        self.springs.set_target(offset.as_vec2());
        self.needs_frame()
    }

    /// Pointer left or the interaction was cancelled: head back to neutral
    /// through the same springs. Idempotent.
    pub fn pointer_leave(&mut self) -> bool {
        self.springs.set_target(NormalizedOffset::ZERO.as_vec2());
        let next = if self.springs.is_at_rest() {
            Phase::Idle
        } else {
            Phase::Returning
        };
        if next != self.phase {
            log::trace!("[tilt] {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
        self.needs_frame()
    }

    /// Advance the springs by `dt_sec` seconds of wall time.
    pub fn tick(&mut self, dt_sec: f32) -> TickOutcome {
        let moving = self.springs.step(dt_sec);
        if !moving && self.phase == Phase::Returning {
            log::trace!("[tilt] Returning -> Idle");
            self.phase = Phase::Idle;
        }
        TickOutcome {
            phase: self.phase,
            offset: self.offset(),
            transform: self.transform(),
            settled: !moving,
        }
    }
}
