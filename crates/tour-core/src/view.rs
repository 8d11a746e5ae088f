//! View-side state types shared with the web frontend.
//!
//! These types avoid referencing platform-specific APIs and are suitable for
//! use on both native and web targets.

use crate::constants::{
    DEFAULT_FOV, DEFAULT_PITCH, DEFAULT_YAW, HOTSPOT_SCALE_FOV_FLOOR, HOTSPOT_SCALE_MAX,
    HOTSPOT_SCALE_MIN,
};
use serde::{Deserialize, Serialize};

/// Angular orientation and field of view of a rectilinear view, in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewParameters {
    #[serde(default)]
    pub yaw: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default = "default_fov")]
    pub fov: f64,
}

fn default_fov() -> f64 {
    DEFAULT_FOV
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            fov: DEFAULT_FOV,
        }
    }
}

impl ViewParameters {
    pub fn new(yaw: f64, pitch: f64, fov: f64) -> Self {
        Self { yaw, pitch, fov }
    }

    /// Same field of view, new orientation.
    pub fn with_orientation(self, yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch, ..self }
    }
}

/// Visual scale applied to hotspot markers for a given field of view.
///
/// Wide views shrink markers and narrow views enlarge them, clamped to
/// \[0.5, 0.95\] so icons neither balloon nor vanish.
#[inline]
pub fn hotspot_scale(fov: f64) -> f64 {
    (1.0 / fov.max(HOTSPOT_SCALE_FOV_FLOOR)).clamp(HOTSPOT_SCALE_MIN, HOTSPOT_SCALE_MAX)
}
