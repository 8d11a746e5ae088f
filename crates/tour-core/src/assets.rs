//! Asset resolution: symbolic icon/media ids to concrete URLs.

use crate::model::{Asset, ContentBlock, Tour};
use fnv::FnvHashMap;
use std::ops::Deref;

/// Id → reference lookup for one asset namespace.
#[derive(Clone, Debug, Default)]
pub struct AssetIndex<'a> {
    map: FnvHashMap<&'a str, &'a str>,
}

impl<'a> AssetIndex<'a> {
    pub fn new(assets: &'a [Asset]) -> Self {
        let map = assets
            .iter()
            .map(|a| (a.id.as_str(), a.reference()))
            .collect();
        Self { map }
    }

    /// Unknown or absent ids resolve to the empty string.
    pub fn resolve(&self, id: Option<&str>) -> String {
        id.and_then(|id| self.map.get(id))
            .map(|s| (*s).to_owned())
            .unwrap_or_default()
    }
}

/// A [`Tour`] whose hotspot icons and content media have been resolved.
///
/// Only obtainable through [`ResolvedTour::resolve`], which consumes the tour,
/// so resolution happens exactly once and before any session is built.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTour {
    tour: Tour,
}

impl ResolvedTour {
    pub fn resolve(mut tour: Tour) -> Self {
        let assets = std::mem::take(&mut tour.assets);
        let icons = AssetIndex::new(&assets.icons);
        let media = AssetIndex::new(&assets.media);

        let mut unresolved = 0usize;
        for hotspot in tour.scenes.iter_mut().flat_map(|s| s.hotspots.iter_mut()) {
            hotspot.icon_path = icons.resolve(hotspot.icon_id.as_deref());
            if hotspot.icon_path.is_empty() && hotspot.icon_id.is_some() {
                unresolved += 1;
            }
            for block in &mut hotspot.content_blocks {
                let Some(path) = block.asset_id().map(|id| media.resolve(Some(id))) else {
                    continue;
                };
                if path.is_empty() {
                    unresolved += 1;
                }
                set_asset_path(block, path);
            }
        }
        if unresolved > 0 {
            log::debug!("[assets] {unresolved} reference(s) left unresolved");
        }

        tour.assets = assets;
        Self { tour }
    }

    pub fn into_inner(self) -> Tour {
        self.tour
    }
}

impl Deref for ResolvedTour {
    type Target = Tour;

    fn deref(&self) -> &Tour {
        &self.tour
    }
}

fn set_asset_path(block: &mut ContentBlock, path: String) {
    match block {
        ContentBlock::Image { asset_path, .. }
        | ContentBlock::Video { asset_path, .. }
        | ContentBlock::Audio { asset_path, .. } => *asset_path = path,
        ContentBlock::Text { .. } | ContentBlock::Link { .. } | ContentBlock::Unknown => {}
    }
}
