//! Seams to the external panorama rendering engine.
//!
//! The core never draws anything itself. A front-end implements these traits
//! over its engine (Marzipano in the browser, a logging stand-in natively) and
//! the session logic drives them.

use crate::geometry::SceneRuntime;
use crate::model::Hotspot;
use crate::view::ViewParameters;
use std::fmt;

/// Callback invoked with the new parameters after every view change.
pub type ViewListener = Box<dyn FnMut(ViewParameters)>;

/// A viewer bound to one display surface.
pub trait PanoramaViewer {
    type Scene: PanoramaScene;
    type Error: fmt::Display;

    /// Create a scene with a rectilinear view starting at `initial`, limited by
    /// the runtime's view limit.
    fn create_scene(
        &self,
        runtime: &SceneRuntime,
        initial: ViewParameters,
    ) -> Result<Self::Scene, Self::Error>;

    /// Register (if needed) and enable the engine's device-orientation
    /// control method on this viewer.
    fn enable_orientation_control(&self);

    fn disable_orientation_control(&self);
}

/// A scene living inside a [`PanoramaViewer`]. Handles are cheap to clone and
/// refer to the same engine object.
pub trait PanoramaScene: Clone + 'static {
    /// Presentation handle of one hotspot marker.
    type Hotspot: Clone + 'static;

    /// Make this the visible scene of its viewer.
    fn switch_to(&self);

    fn view_parameters(&self) -> ViewParameters;

    /// Apply new parameters. Must notify every view listener.
    fn set_view_parameters(&self, params: ViewParameters);

    /// Place a marker for `hotspot` at its yaw/pitch. `None` when the
    /// surface cannot host one; the hotspot is then simply not shown.
    fn create_hotspot(&self, hotspot: &Hotspot) -> Option<Self::Hotspot>;

    fn set_hotspot_scale(&self, hotspot: &Self::Hotspot, scale: f64);

    /// Subscribe to view changes for the lifetime of the scene.
    fn on_view_change(&self, listener: ViewListener);
}
