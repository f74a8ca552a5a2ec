/// Spring and tilt tuning constants.
///
/// These constants express intended behavior (rotation limits, spring
/// coefficients, rest thresholds) and keep magic numbers out of the code.
// Rotation range (degrees at the surface edge)
pub const DEFAULT_MAX_TILT_DEG: f32 = 15.0;

// Normalized offsets live in [-OFFSET_HALF_RANGE, OFFSET_HALF_RANGE]
pub const OFFSET_HALF_RANGE: f32 = 0.5;

// Gentle spring: slow, slightly underdamped settle
pub const GENTLE_STIFFNESS: f32 = 150.0;
pub const GENTLE_DAMPING: f32 = 15.0;

// Snappy spring: fast, close to critical
pub const SNAPPY_STIFFNESS: f32 = 500.0;
pub const SNAPPY_DAMPING: f32 = 30.0;

pub const DEFAULT_MASS: f32 = 1.0;

// Rest thresholds (offset units and offset units per second)
pub const DEFAULT_REST_DELTA: f32 = 0.001;
pub const DEFAULT_REST_SPEED: f32 = 0.01;

// Frame timing (seconds)
pub const NOMINAL_FRAME_DT_SEC: f32 = 1.0 / 60.0;
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after a backgrounded tab
pub const MAX_SUBSTEP_SEC: f32 = 1.0 / 240.0; // keeps stiff springs stable

// Semi-implicit Euler stays stable while omega*h and (c/m)*h stay at or below 1
pub const MAX_NATURAL_FREQUENCY: f32 = 1.0 / MAX_SUBSTEP_SEC;
pub const MAX_DAMPING_RATE: f32 = 1.0 / MAX_SUBSTEP_SEC;

// Presentation
pub const DEFAULT_PERSPECTIVE_PX: f32 = 1000.0;
pub const DEFAULT_LAYER_SHIFT: f32 = 0.0;

// Inline capacity for depth layers per card
pub const INLINE_DEPTH_LAYERS: usize = 4;
