//! Mass-spring-damper smoothing.
//!
//! Each axis of a tilt card owns one [`Spring`]. Hosts advance it once per
//! rendered frame with the elapsed time; the spring reports when it has come
//! to rest so the host can stop requesting frames.

use crate::constants::{
    DEFAULT_MASS, DEFAULT_REST_DELTA, DEFAULT_REST_SPEED, GENTLE_DAMPING, GENTLE_STIFFNESS,
    MAX_DAMPING_RATE, MAX_FRAME_DT_SEC, MAX_NATURAL_FREQUENCY, MAX_SUBSTEP_SEC,
    NOMINAL_FRAME_DT_SEC, SNAPPY_DAMPING, SNAPPY_STIFFNESS,
};
use glam::Vec2;

/// Spring coefficients and rest thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Maximum distance from the target that still counts as settled.
    pub rest_delta: f32,
    /// Maximum speed that still counts as settled.
    pub rest_speed: f32,
}

impl SpringConfig {
    pub const GENTLE: Self = Self {
        stiffness: GENTLE_STIFFNESS,
        damping: GENTLE_DAMPING,
        mass: DEFAULT_MASS,
        rest_delta: DEFAULT_REST_DELTA,
        rest_speed: DEFAULT_REST_SPEED,
    };

    pub const SNAPPY: Self = Self {
        stiffness: SNAPPY_STIFFNESS,
        damping: SNAPPY_DAMPING,
        mass: DEFAULT_MASS,
        rest_delta: DEFAULT_REST_DELTA,
        rest_speed: DEFAULT_REST_SPEED,
    };

    /// `c / (2 sqrt(k m))`; 1.0 is critical damping.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Natural angular frequency in radians per second.
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping per unit mass, `c / m`, in 1/s.
    pub fn damping_rate(&self) -> f32 {
        self.damping / self.mass
    }

    /// Whether the sub-stepped integrator converges for these coefficients.
    pub fn is_stable(&self) -> bool {
        self.damping > 0.0
            && self.natural_frequency() <= MAX_NATURAL_FREQUENCY
            && self.damping_rate() <= MAX_DAMPING_RATE
    }

    /// Peak overshoot, as a fraction of the step size, for a spring released
    /// from rest toward a new target. Zero for critically and over-damped springs.
    pub fn overshoot_bound(&self) -> f32 {
        let zeta = self.damping_ratio();
        if zeta >= 1.0 {
            return 0.0;
        }
        (-zeta * std::f32::consts::PI / (1.0 - zeta * zeta).sqrt()).exp()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::GENTLE
    }
}

/// Physical state of one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpringState {
    pub value: f32,
    pub velocity: f32,
}

#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    state: SpringState,
    target: f32,
    at_rest: bool,
}

impl Spring {
    /// A spring resting at zero.
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            state: SpringState::default(),
            target: 0.0,
            at_rest: true,
        }
    }

    /// A spring at an arbitrary starting state, aimed at `target`.
    pub fn with_state(config: SpringConfig, state: SpringState, target: f32) -> Self {
        let mut s = Self {
            config,
            state,
            target,
            at_rest: false,
        };
        s.try_settle();
        s
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.state.value
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.state.velocity
    }

    #[inline]
    pub fn state(&self) -> SpringState {
        self.state
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Aim the spring at a new target without touching value or velocity.
    /// Non-finite targets are ignored.
    pub fn set_target(&mut self, target: f32) {
        if !target.is_finite() || target == self.target {
            return;
        }
        self.target = target;
        self.at_rest = false;
    }

    /// Advance by `dt_sec` of wall time. Returns `true` while still moving.
    pub fn step(&mut self, dt_sec: f32) -> bool {
        if self.at_rest {
            return false;
        }
        let dt = sanitize_frame_dt(dt_sec);
        let substeps = (dt / MAX_SUBSTEP_SEC).ceil().max(1.0) as u32;
        let h = dt / substeps as f32;
        let k = self.config.stiffness;
        let c = self.config.damping;
        let m = self.config.mass;
        for _ in 0..substeps {
            let displacement = self.state.value - self.target;
            let accel = (-k * displacement - c * self.state.velocity) / m;
            self.state.velocity += accel * h;
            self.state.value += self.state.velocity * h;
            if !(self.state.value.is_finite() && self.state.velocity.is_finite()) {
                log::warn!("[spring] diverged with {:?}; snapping to target", self.config);
                self.snap_to_target();
                return false;
            }
            if self.try_settle() {
                return false;
            }
        }
        true
    }

    fn try_settle(&mut self) -> bool {
        let distance = (self.state.value - self.target).abs();
        if distance < self.config.rest_delta && self.state.velocity.abs() < self.config.rest_speed {
            self.snap_to_target();
        }
        self.at_rest
    }

    fn snap_to_target(&mut self) {
        self.state.value = self.target;
        self.state.velocity = 0.0;
        self.at_rest = true;
    }
}

/// Replace unusable frame deltas with the nominal one and clamp long gaps.
#[inline]
pub fn sanitize_frame_dt(dt_sec: f32) -> f32 {
    if !dt_sec.is_finite() || dt_sec <= 0.0 {
        NOMINAL_FRAME_DT_SEC
    } else {
        dt_sec.min(MAX_FRAME_DT_SEC)
    }
}

/// Two independent springs, one per axis.
#[derive(Clone, Debug)]
pub struct SpringPair {
    pub x: Spring,
    pub y: Spring,
}

impl SpringPair {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            x: Spring::new(config),
            y: Spring::new(config),
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    /// Returns `true` while either axis is still moving.
    pub fn step(&mut self, dt_sec: f32) -> bool {
        let moving_x = self.x.step(dt_sec);
        let moving_y = self.y.step(dt_sec);
        moving_x || moving_y
    }

    #[inline]
    pub fn value(&self) -> Vec2 {
        Vec2::new(self.x.value(), self.y.value())
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        Vec2::new(self.x.target(), self.y.target())
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }
}
