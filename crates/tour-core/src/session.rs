//! Viewer session: one rendering surface, its scenes, and the active scene.

use crate::assets::ResolvedTour;
use crate::content::ModalContent;
use crate::engine::{PanoramaScene, PanoramaViewer};
use crate::geometry::{resolve_scene, resolve_scene_degraded, SceneRuntime};
use crate::model::Scene;
use crate::stereo::StereoPair;
use crate::view::{hotspot_scale, ViewParameters};
use smallvec::SmallVec;

/// How scenes were admitted into the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Only renderable scenes.
    Strict,
    /// Nothing resolved strictly; fallback-only tile sets were admitted.
    Degraded,
}

impl ResolutionMode {
    pub fn resolve(self, scene: &Scene) -> Option<SceneRuntime> {
        match self {
            ResolutionMode::Strict => resolve_scene(scene),
            ResolutionMode::Degraded => resolve_scene_degraded(scene),
        }
    }
}

/// Which surface currently receives orientation input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    Primary,
    Stereo,
}

type HotspotHandles<S> = SmallVec<[<S as PanoramaScene>::Hotspot; 4]>;

pub struct SessionScene<S: PanoramaScene> {
    tour_index: usize,
    pub scene: S,
    hotspots: HotspotHandles<S>,
}

impl<S: PanoramaScene> SessionScene<S> {
    pub fn hotspots(&self) -> &[S::Hotspot] {
        &self.hotspots
    }
}

pub struct ViewerSession<V: PanoramaViewer> {
    tour: ResolvedTour,
    viewer: V,
    mode: ResolutionMode,
    scenes: Vec<SessionScene<V::Scene>>,
    current: Option<usize>,
    stereo: Option<StereoPair<V>>,
    presentation: Presentation,
}

impl<V: PanoramaViewer> ViewerSession<V> {
    /// Create engine scenes for every navigable scene and show the first one.
    ///
    /// Non-renderable scenes are skipped. If that leaves nothing, scenes are
    /// admitted in [`ResolutionMode::Degraded`]; if still nothing, the session
    /// is empty and no scene activates.
    pub fn build(viewer: V, tour: ResolvedTour) -> Self {
        let mut mode = ResolutionMode::Strict;
        let mut scenes = build_scenes(&viewer, &tour, mode);
        if scenes.is_empty() && !tour.scenes.is_empty() {
            log::warn!("[session] no renderable scenes; admitting fallback-only tile sets");
            mode = ResolutionMode::Degraded;
            scenes = build_scenes(&viewer, &tour, mode);
        }
        if scenes.is_empty() {
            log::warn!("[session] tour has no content to show");
        }

        let mut session = Self {
            tour,
            viewer,
            mode,
            scenes,
            current: None,
            stereo: None,
            presentation: Presentation::Primary,
        };
        session.switch_scene(0);
        session
    }

    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    pub fn has_content(&self) -> bool {
        !self.scenes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn scenes(&self) -> &[SessionScene<V::Scene>] {
        &self.scenes
    }

    pub fn scene_data(&self, index: usize) -> Option<&Scene> {
        let entry = self.scenes.get(index)?;
        self.tour.scenes.get(entry.tour_index)
    }

    /// `(id, name)` of every navigable scene, in display order.
    pub fn navigation(&self) -> Vec<(&str, &str)> {
        (0..self.scenes.len())
            .filter_map(|i| self.scene_data(i))
            .map(|s| (s.id.as_str(), s.name.as_str()))
            .collect()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&Scene> {
        self.scene_data(self.current?)
    }

    pub fn current_view(&self) -> Option<ViewParameters> {
        let entry = self.scenes.get(self.current?)?;
        Some(entry.scene.view_parameters())
    }

    /// Show scene `index` at its initial view. Out-of-range indices are ignored.
    pub fn switch_scene(&mut self, index: usize) -> bool {
        let Some(entry) = self.scenes.get(index) else {
            return false;
        };
        let Some(data) = self.tour.scenes.get(entry.tour_index) else {
            return false;
        };
        let initial = data.initial_view();

        self.current = Some(index);
        entry.scene.set_view_parameters(initial);
        entry.scene.switch_to();
        apply_hotspot_scale(&entry.scene, &entry.hotspots, entry.scene.view_parameters().fov);
        log::debug!("[session] switched to '{}'", data.id);

        if let Some(stereo) = &self.stereo {
            stereo.switch_to(&data.id, initial);
        }
        true
    }

    pub fn switch_scene_by_id(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(index) => self.switch_scene(index),
            None => false,
        }
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        (0..self.scenes.len()).find(|&i| self.scene_data(i).is_some_and(|s| s.id == id))
    }

    /// Re-apply the current scene's initial view. No-op without a current scene.
    pub fn reset_orientation(&self) {
        let Some(index) = self.current else {
            return;
        };
        let (Some(entry), Some(data)) = (self.scenes.get(index), self.scene_data(index)) else {
            return;
        };
        entry.scene.set_view_parameters(data.initial_view());
    }

    /// Feed an orientation into the current scene of the active presentation,
    /// keeping its field of view.
    pub fn apply_orientation(&self, yaw: f64, pitch: f64) {
        let Some(target) = self.active_scene() else {
            return;
        };
        let params = target.view_parameters().with_orientation(yaw, pitch);
        target.set_view_parameters(params);
    }

    fn active_scene(&self) -> Option<&V::Scene> {
        let index = self.current?;
        if self.presentation == Presentation::Stereo {
            let id = &self.scene_data(index)?.id;
            return self.stereo.as_ref()?.left_scene(id);
        }
        self.scenes.get(index).map(|e| &e.scene)
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Viewer that receives orientation control: the left eye while stereo
    /// is presented, the primary viewer otherwise.
    pub fn active_viewer(&self) -> &V {
        match (&self.presentation, &self.stereo) {
            (Presentation::Stereo, Some(stereo)) => stereo.left_viewer(),
            _ => &self.viewer,
        }
    }

    pub fn stereo(&self) -> Option<&StereoPair<V>> {
        self.stereo.as_ref()
    }

    /// Present the tour stereoscopically. The eye pair is built on first use
    /// with viewers from `make_viewers` and reused afterwards; a failure to
    /// create viewers leaves the primary presentation in place. Both eyes snap
    /// to the primary viewer's current scene and view.
    pub fn enter_stereo<E>(
        &mut self,
        make_viewers: impl FnOnce() -> Result<(V, V), E>,
    ) -> Result<Presentation, E> {
        if self.stereo.is_none() {
            let (left, right) = make_viewers()?;
            self.stereo = Some(StereoPair::build(left, right, &self.tour, self.mode));
        }

        self.presentation = Presentation::Primary;
        let (Some(stereo), Some(index)) = (&self.stereo, self.current) else {
            return Ok(self.presentation);
        };
        let (Some(entry), Some(data)) = (self.scenes.get(index), self.scene_data(index)) else {
            return Ok(self.presentation);
        };
        if stereo.switch_to(&data.id, entry.scene.view_parameters()) {
            self.presentation = Presentation::Stereo;
        }
        Ok(self.presentation)
    }

    /// Return orientation input to the primary viewer. The eye pair stays cached.
    pub fn exit_stereo(&mut self) {
        self.presentation = Presentation::Primary;
    }

    pub fn modal_for(&self, scene_index: usize, hotspot_index: usize) -> Option<ModalContent> {
        let hotspot = self.scene_data(scene_index)?.hotspots.get(hotspot_index)?;
        Some(ModalContent::for_hotspot(hotspot))
    }
}

fn build_scenes<V: PanoramaViewer>(
    viewer: &V,
    tour: &ResolvedTour,
    mode: ResolutionMode,
) -> Vec<SessionScene<V::Scene>> {
    let mut scenes = Vec::with_capacity(tour.scenes.len());
    for (tour_index, data) in tour.scenes.iter().enumerate() {
        let Some(runtime) = mode.resolve(data) else {
            log::warn!("[session] scene '{}' has no usable geometry; skipped", data.id);
            continue;
        };
        let scene = match viewer.create_scene(&runtime, data.initial_view()) {
            Ok(scene) => scene,
            Err(e) => {
                log::warn!("[session] engine rejected scene '{}': {e}", data.id);
                continue;
            }
        };
        let hotspots: HotspotHandles<V::Scene> =
            data.hotspots.iter().filter_map(|h| scene.create_hotspot(h)).collect();

        let observed = scene.clone();
        let handles = hotspots.clone();
        scene.on_view_change(Box::new(move |params| {
            apply_hotspot_scale(&observed, &handles, params.fov);
        }));

        scenes.push(SessionScene {
            tour_index,
            scene,
            hotspots,
        });
    }
    scenes
}

fn apply_hotspot_scale<S: PanoramaScene>(scene: &S, hotspots: &[S::Hotspot], fov: f64) {
    if hotspots.is_empty() {
        return;
    }
    let scale = hotspot_scale(fov);
    for hotspot in hotspots {
        scene.set_hotspot_scale(hotspot, scale);
    }
}
