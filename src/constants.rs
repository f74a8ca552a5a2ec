/// DOM names and front-end tuning used by the web binding.
///
/// Numeric tuning of the tilt itself lives in `tilt_core::constants`; these
/// are the names the page markup and stylesheet have to agree on.
// Elements mounted by `mount_all` when no selector is given
pub const DEFAULT_CARD_SELECTOR: &str = "[data-tilt]";

// Descendants that become depth layers
pub const DEPTH_LAYER_SELECTOR: &str = "[data-tilt-depth]";

// Pointer events a card listens to
pub const EVENT_POINTER_MOVE: &str = "pointermove";
pub const EVENT_POINTER_LEAVE: &str = "pointerleave";
pub const EVENT_POINTER_CANCEL: &str = "pointercancel";

// Style properties written on mount and every frame
pub const STYLE_TRANSFORM: &str = "transform";
pub const STYLE_TRANSFORM_STYLE: &str = "transform-style";
pub const STYLE_WILL_CHANGE: &str = "will-change";
pub const PRESERVE_3D: &str = "preserve-3d";

// Keys for id-less elements are `tilt-<n>`
pub const GENERATED_KEY_PREFIX: &str = "tilt-";

// Inline capacity for depth layer handles per card (matches the core's layer list)
pub const INLINE_LAYER_HANDLES: usize = 4;
