//! Renderer-neutral modal content built from hotspot content blocks.

use crate::constants::{
    DEFAULT_HOTSPOT_TITLE, DEFAULT_IMAGE_ALT, DEFAULT_LINK_HREF, DEFAULT_LINK_LABEL,
};
use crate::model::{ContentBlock, Hotspot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalEntry {
    Text(String),
    Image { src: String, alt: String },
    /// External player (e.g. a video host) shown in an iframe.
    EmbeddedVideo { url: String },
    Video { src: String },
    Audio { src: String },
    Link { href: String, label: String },
}

/// One content block: its kind as a heading, plus the media to show.
/// `entry` is `None` when the block has nothing playable (e.g. an unresolved asset).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalSection {
    pub heading: &'static str,
    pub entry: Option<ModalEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    pub sections: Vec<ModalSection>,
}

impl ModalContent {
    pub fn for_hotspot(hotspot: &Hotspot) -> Self {
        let declared = hotspot.title.as_deref().filter(|t| !t.is_empty());
        let title = declared.unwrap_or(DEFAULT_HOTSPOT_TITLE).to_owned();
        let alt = declared.unwrap_or(DEFAULT_IMAGE_ALT);
        let sections = hotspot
            .content_blocks
            .iter()
            .filter(|block| !matches!(block, ContentBlock::Unknown))
            .map(|block| ModalSection {
                heading: block.kind(),
                entry: entry_for(block, alt),
            })
            .collect();
        Self { title, sections }
    }

    /// Single text block under `title`.
    pub fn notice(title: &str, text: &str) -> Self {
        Self {
            title: title.to_owned(),
            sections: vec![ModalSection {
                heading: "text",
                entry: Some(ModalEntry::Text(text.to_owned())),
            }],
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().filter_map(|s| match &s.entry {
            Some(ModalEntry::Text(t)) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

fn entry_for(block: &ContentBlock, alt: &str) -> Option<ModalEntry> {
    match block {
        ContentBlock::Text { value } => Some(ModalEntry::Text(value.clone())),
        ContentBlock::Image { asset_path, .. } => non_empty(asset_path).map(|src| ModalEntry::Image {
            src,
            alt: alt.to_owned(),
        }),
        ContentBlock::Video {
            url, asset_path, ..
        } => match url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => Some(ModalEntry::EmbeddedVideo {
                url: url.to_owned(),
            }),
            None => non_empty(asset_path).map(|src| ModalEntry::Video { src }),
        },
        ContentBlock::Audio { asset_path, .. } => {
            non_empty(asset_path).map(|src| ModalEntry::Audio { src })
        }
        ContentBlock::Unknown => None,
        ContentBlock::Link { url, label } => Some(ModalEntry::Link {
            href: url
                .as_deref()
                .filter(|u| !u.is_empty())
                .unwrap_or(DEFAULT_LINK_HREF)
                .to_owned(),
            label: label
                .as_deref()
                .filter(|l| !l.is_empty())
                .unwrap_or(DEFAULT_LINK_LABEL)
                .to_owned(),
        }),
    }
}

#[inline]
fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}
