//! Per-card configuration.
//!
//! Every field has a default; hosts override them programmatically with the
//! `with_*` methods or from `data-tilt-*` attributes via
//! [`TiltConfig::from_attributes`].

use crate::constants::{
    DEFAULT_LAYER_SHIFT, DEFAULT_MAX_TILT_DEG, DEFAULT_PERSPECTIVE_PX, MAX_DAMPING_RATE,
    MAX_NATURAL_FREQUENCY,
};
use crate::normalize::Normalization;
use crate::spring::SpringConfig;
use crate::transform::{DepthLayer, DepthLayers};
use std::str::FromStr;
use thiserror::Error;

pub const ATTR_PRESET: &str = "data-tilt-preset";
pub const ATTR_MAX_DEG: &str = "data-tilt-max";
pub const ATTR_STIFFNESS: &str = "data-tilt-stiffness";
pub const ATTR_DAMPING: &str = "data-tilt-damping";
pub const ATTR_MASS: &str = "data-tilt-mass";
pub const ATTR_EPSILON: &str = "data-tilt-epsilon";
pub const ATTR_PERSPECTIVE: &str = "data-tilt-perspective";
pub const ATTR_RANGE: &str = "data-tilt-range";
pub const ATTR_SHIFT: &str = "data-tilt-shift";
pub const ATTR_DEPTH: &str = "data-tilt-depth";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{attr}: expected a finite number, got {value:?}")]
    NotANumber { attr: &'static str, value: String },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    /// The integrator would diverge at its fixed sub-step.
    #[error("{field} of {value} is above the stable limit of {limit}")]
    Unstable {
        field: &'static str,
        value: f32,
        limit: f32,
    },
    #[error("unknown preset {0:?} (expected \"gentle\" or \"snappy\")")]
    UnknownPreset(String),
}

/// Named spring tunings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpringPreset {
    Gentle,
    Snappy,
}

impl SpringPreset {
    pub fn spring(self) -> SpringConfig {
        match self {
            SpringPreset::Gentle => SpringConfig::GENTLE,
            SpringPreset::Snappy => SpringConfig::SNAPPY,
        }
    }
}

impl FromStr for SpringPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gentle" => Ok(SpringPreset::Gentle),
            "snappy" => Ok(SpringPreset::Snappy),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TiltConfig {
    /// Rotation reached at the surface edge, in degrees.
    pub max_deg: f32,
    pub spring: SpringConfig,
    /// `None` leaves perspective to the parent element's CSS.
    pub perspective_px: Option<f32>,
    pub normalization: Normalization,
    pub layers: DepthLayers,
    /// Lateral drift of depth layers per pixel of depth.
    pub layer_shift: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_deg: DEFAULT_MAX_TILT_DEG,
            spring: SpringConfig::default(),
            perspective_px: Some(DEFAULT_PERSPECTIVE_PX),
            normalization: Normalization::default(),
            layers: DepthLayers::new(),
            layer_shift: DEFAULT_LAYER_SHIFT,
        }
    }
}

impl TiltConfig {
    pub fn from_preset(preset: SpringPreset) -> Self {
        Self::default().with_spring(preset.spring())
    }

    pub fn with_max_deg(mut self, max_deg: f32) -> Self {
        self.max_deg = max_deg;
        self
    }

    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_rest_epsilon(mut self, rest_delta: f32) -> Self {
        self.spring.rest_delta = rest_delta;
        self
    }

    pub fn with_perspective(mut self, perspective_px: Option<f32>) -> Self {
        self.perspective_px = perspective_px;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_layer(mut self, layer: DepthLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_layer_shift(mut self, layer_shift: f32) -> Self {
        self.layer_shift = layer_shift;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("max_deg", self.max_deg)?;
        positive("stiffness", self.spring.stiffness)?;
        // Undamped springs never settle
        positive("damping", self.spring.damping)?;
        positive("mass", self.spring.mass)?;
        at_most(
            "natural_frequency",
            self.spring.natural_frequency(),
            MAX_NATURAL_FREQUENCY,
        )?;
        at_most("damping_rate", self.spring.damping_rate(), MAX_DAMPING_RATE)?;
        positive("rest_delta", self.spring.rest_delta)?;
        positive("rest_speed", self.spring.rest_speed)?;
        if let Some(p) = self.perspective_px {
            positive("perspective", p)?;
        }
        if let Normalization::PixelRange { half_range_px } = self.normalization {
            positive("range", half_range_px)?;
        }
        finite("layer_shift", self.layer_shift)?;
        for layer in &self.layers {
            finite("depth", layer.translate_z_px)?;
        }
        Ok(())
    }

    /// Build a configuration from `data-tilt-*` attributes.
    ///
    /// `attr` returns the raw attribute value, if present. A preset is applied
    /// first; individual attributes then override it. Depth layers live on
    /// child elements and are added by the host with [`parse_depth`].
    pub fn from_attributes(attr: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = match attr(ATTR_PRESET) {
            Some(name) => Self::from_preset(name.parse()?),
            None => Self::default(),
        };
        if let Some(v) = number(&attr, ATTR_MAX_DEG)? {
            cfg.max_deg = v;
        }
        if let Some(v) = number(&attr, ATTR_STIFFNESS)? {
            cfg.spring.stiffness = v;
        }
        if let Some(v) = number(&attr, ATTR_DAMPING)? {
            cfg.spring.damping = v;
        }
        if let Some(v) = number(&attr, ATTR_MASS)? {
            cfg.spring.mass = v;
        }
        if let Some(v) = number(&attr, ATTR_EPSILON)? {
            cfg.spring.rest_delta = v;
        }
        if let Some(raw) = attr(ATTR_PERSPECTIVE) {
            cfg.perspective_px = if raw.trim().eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_number(ATTR_PERSPECTIVE, &raw)?)
            };
        }
        if let Some(v) = number(&attr, ATTR_RANGE)? {
            cfg.normalization = Normalization::PixelRange { half_range_px: v };
        }
        if let Some(v) = number(&attr, ATTR_SHIFT)? {
            cfg.layer_shift = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Parse a `data-tilt-depth` value (pixels, optional `px` suffix).
pub fn parse_depth(raw: &str) -> Result<DepthLayer, ConfigError> {
    parse_number(ATTR_DEPTH, raw).map(DepthLayer::new)
}

fn number(
    attr: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<f32>, ConfigError> {
    attr(name).map(|raw| parse_number(name, &raw)).transpose()
}

fn parse_number(attr: &'static str, raw: &str) -> Result<f32, ConfigError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_suffix("deg")
        .or_else(|| trimmed.strip_suffix("px"))
        .unwrap_or(trimmed)
        .trim();
    match digits.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConfigError::NotANumber {
            attr,
            value: raw.to_string(),
        }),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn at_most(field: &'static str, value: f32, limit: f32) -> Result<(), ConfigError> {
    if value <= limit {
        Ok(())
    } else {
        Err(ConfigError::Unstable { field, value, limit })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}
