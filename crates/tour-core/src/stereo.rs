//! Left/right viewer pair for stereoscopic presentation.

use crate::assets::ResolvedTour;
use crate::engine::{PanoramaScene, PanoramaViewer};
use crate::session::ResolutionMode;
use crate::view::ViewParameters;

pub struct EyeScene<S> {
    pub id: String,
    pub scene: S,
}

/// Two viewers showing the same tour, one per eye.
///
/// Each eye resolves and owns its own scenes. View changes flow from the left
/// eye to the right eye only.
pub struct StereoPair<V: PanoramaViewer> {
    left: V,
    // Only its scenes are driven; the viewer itself is held for their lifetime.
    _right: V,
    left_scenes: Vec<EyeScene<V::Scene>>,
    right_scenes: Vec<EyeScene<V::Scene>>,
}

impl<V: PanoramaViewer> StereoPair<V> {
    pub fn build(left: V, right: V, tour: &ResolvedTour, mode: ResolutionMode) -> Self {
        let left_scenes = build_eye(&left, tour, mode, "left");
        let right_scenes = build_eye(&right, tour, mode, "right");

        for eye in &left_scenes {
            let Some(mirror) = right_scenes.iter().find(|r| r.id == eye.id) else {
                continue;
            };
            let mirror = mirror.scene.clone();
            eye.scene
                .on_view_change(Box::new(move |params| mirror.set_view_parameters(params)));
        }

        log::info!(
            "[stereo] built eye pair: left={} right={}",
            left_scenes.len(),
            right_scenes.len()
        );
        Self {
            left,
            _right: right,
            left_scenes,
            right_scenes,
        }
    }

    /// Show scene `id` in both eyes with `params`. False when either eye lacks it.
    pub fn switch_to(&self, id: &str, params: ViewParameters) -> bool {
        let (Some(left), Some(right)) = (self.left_scene(id), self.right_scene(id)) else {
            return false;
        };
        left.set_view_parameters(params);
        right.set_view_parameters(params);
        left.switch_to();
        right.switch_to();
        true
    }

    pub fn left_viewer(&self) -> &V {
        &self.left
    }

    pub fn left_scene(&self, id: &str) -> Option<&V::Scene> {
        find(&self.left_scenes, id)
    }

    pub fn right_scene(&self, id: &str) -> Option<&V::Scene> {
        find(&self.right_scenes, id)
    }

    pub fn len(&self) -> usize {
        self.left_scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left_scenes.is_empty()
    }
}

fn find<'a, S>(scenes: &'a [EyeScene<S>], id: &str) -> Option<&'a S> {
    scenes.iter().find(|s| s.id == id).map(|s| &s.scene)
}

fn build_eye<V: PanoramaViewer>(
    viewer: &V,
    tour: &ResolvedTour,
    mode: ResolutionMode,
    eye: &str,
) -> Vec<EyeScene<V::Scene>> {
    tour.scenes
        .iter()
        .filter_map(|data| {
            let runtime = mode.resolve(data)?;
            match viewer.create_scene(&runtime, data.initial_view()) {
                Ok(scene) => Some(EyeScene {
                    id: data.id.clone(),
                    scene,
                }),
                Err(e) => {
                    log::warn!("[stereo] {eye} eye could not create '{}': {e}", data.id);
                    None
                }
            }
        })
        .collect()
}
