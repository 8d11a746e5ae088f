//! Outcome of an attempt to start an immersive (WebXR) session.
//!
//! Entering VR always toggles fullscreen and shows the stereo pair first; this
//! only decides which notice the user sees afterwards. Every attempt is
//! terminal: no retries, and a started session is ended right away.

use crate::constants::VR_NOTICE_TITLE;
use crate::content::ModalContent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmersiveOutcome {
    /// The browser exposes no XR system at all.
    Unavailable,
    /// XR exists but `immersive-vr` is not supported.
    Unsupported,
    /// The session request was rejected.
    Failed,
    Started,
}

impl ImmersiveOutcome {
    pub fn message(self) -> &'static str {
        match self {
            ImmersiveOutcome::Unavailable => {
                "WebXR is not available in this browser. Cardboard mode uses fullscreen only."
            }
            ImmersiveOutcome::Unsupported | ImmersiveOutcome::Failed => {
                "Immersive VR is not supported on this device."
            }
            ImmersiveOutcome::Started => {
                "WebXR session started. Stereoscopic rendering integration is in progress."
            }
        }
    }

    pub fn notice(self) -> ModalContent {
        ModalContent::notice(VR_NOTICE_TITLE, self.message())
    }

    /// Whether a started session must be ended by the caller.
    pub fn needs_end(self) -> bool {
        matches!(self, ImmersiveOutcome::Started)
    }
}
