// Shared tuning constants used by both web and native frontends.

// View defaults
pub const DEFAULT_YAW: f64 = 0.0;
pub const DEFAULT_PITCH: f64 = 0.0;
pub const DEFAULT_FOV: f64 = 1.4; // radians, used when a scene omits initialViewParameters

// Geometry defaults
pub const DEFAULT_FLAT_WIDTH: u32 = 4096; // equirect width when neither image width nor faceSize is declared
pub const DEFAULT_FACE_SIZE: u32 = 2048; // cube face size for the view limiter
pub const TILE_URL_PATTERN: &str = "{z}/{f}/{y}/{x}.jpg";
pub const PREVIEW_FILE_NAME: &str = "preview.jpg";
pub const TILES_ROOT: &str = "tiles";

// Hotspot sizing
pub const HOTSPOT_SCALE_MIN: f64 = 0.5;
pub const HOTSPOT_SCALE_MAX: f64 = 0.95;
pub const HOTSPOT_SCALE_FOV_FLOOR: f64 = 0.1; // avoids dividing by a vanishing fov

// Modal defaults
pub const DEFAULT_HOTSPOT_TITLE: &str = "Hotspot";
pub const DEFAULT_IMAGE_ALT: &str = "Hotspot image";
pub const DEFAULT_LINK_LABEL: &str = "Open link";
pub const DEFAULT_LINK_HREF: &str = "#";
pub const VR_NOTICE_TITLE: &str = "VR Mode";
