// Page wiring for the web front-end.

// Tour document, relative to the viewer page
pub const TOUR_URL: &str = "../shared/sample-tour.json";

// Element ids
pub const PANO_ID: &str = "pano";
pub const PANO_LEFT_ID: &str = "pano-left";
pub const PANO_RIGHT_ID: &str = "pano-right";
pub const SCENE_LIST_ID: &str = "scene-list";
pub const MODAL_ID: &str = "hotspot-modal";
pub const MODAL_TITLE_ID: &str = "modal-title";
pub const MODAL_BODY_ID: &str = "modal-body";
pub const MODAL_CLOSE_ID: &str = "btn-close-modal";
pub const BTN_GYRO_ID: &str = "btn-gyro";
pub const BTN_RESET_ID: &str = "btn-reset-orientation";
pub const BTN_VR_ID: &str = "btn-vr";
pub const BTN_FULLSCREEN_ID: &str = "btn-fullscreen"; // optional

// Labels
pub const GYRO_ON_LABEL: &str = "Disable Gyro";
pub const GYRO_OFF_LABEL: &str = "Enable Gyro";
pub const NO_CONTENT_TITLE: &str = "Tour";
pub const NO_CONTENT_TEXT: &str = "This tour has no scenes that can be displayed.";

// Classes / CSS
pub const VR_BODY_CLASS: &str = "vr-mode";
pub const HOTSPOT_SCALE_VAR: &str = "--hotspot-scale";

// Engine
pub const GYRO_METHOD_ID: &str = "gyro";
pub const AUTOROTATE_IDLE_MS: u32 = 3000;
pub const AUTOROTATE_YAW_SPEED: f64 = 0.03;
