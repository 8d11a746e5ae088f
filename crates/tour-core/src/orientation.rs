//! Device orientation input.
//!
//! Two strategies, picked when gyro is switched on: the engine's own
//! device-orientation control, or raw orientation events converted here.

use crate::engine::PanoramaViewer;
use crate::error::GyroError;
use std::f64::consts::FRAC_PI_2;

/// What the platform offers right now. Detected at each enable, never cached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrientationCapabilities {
    /// The rendering engine ships a device-orientation control method.
    pub native_control: bool,
    /// Raw `deviceorientation` events are available.
    pub orientation_events: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GyroStrategy {
    Native,
    Fallback,
}

/// Result of the platform motion-permission prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionPermission {
    Granted,
    Denied,
    /// The platform does not gate motion access.
    NotRequired,
}

impl MotionPermission {
    pub fn allows(self) -> bool {
        !matches!(self, MotionPermission::Denied)
    }
}

/// One raw orientation sample in degrees. Browsers may leave fields null.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationReading {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
}

impl OrientationReading {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
        }
    }
}

/// Yaw/pitch in radians derived from a reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
}

/// Converts readings to view orientation relative to the first heading seen.
#[derive(Clone, Debug, Default)]
pub struct HeadingTracker {
    zero_heading: Option<f64>,
}

impl HeadingTracker {
    pub fn zero_heading(&self) -> Option<f64> {
        self.zero_heading
    }

    pub fn convert(&mut self, reading: OrientationReading) -> Option<Orientation> {
        let (alpha, beta) = (reading.alpha?, reading.beta?);
        let zero = *self.zero_heading.get_or_insert(alpha);
        Some(Orientation {
            yaw: (alpha - zero).to_radians(),
            pitch: (-beta).to_radians().clamp(-FRAC_PI_2, FRAC_PI_2),
        })
    }
}

pub type OrientationHandler = Box<dyn FnMut(OrientationReading)>;

/// Subscription contract for raw orientation events. Unsubscribing with the
/// token returned by `subscribe` removes exactly that handler.
pub trait OrientationEvents {
    type Subscription;

    fn subscribe(&mut self, handler: OrientationHandler) -> Self::Subscription;
    fn unsubscribe(&mut self, subscription: Self::Subscription);
}

enum GyroState<S> {
    Off,
    Native,
    Fallback(S),
}

/// Owns whichever orientation strategy is active.
pub struct GyroController<S> {
    state: GyroState<S>,
}

impl<S> Default for GyroController<S> {
    fn default() -> Self {
        Self {
            state: GyroState::Off,
        }
    }
}

impl<S> GyroController<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, GyroState::Off)
    }

    pub fn strategy(&self) -> Option<GyroStrategy> {
        match self.state {
            GyroState::Off => None,
            GyroState::Native => Some(GyroStrategy::Native),
            GyroState::Fallback(_) => Some(GyroStrategy::Fallback),
        }
    }

    /// Native control wins over raw events.
    pub fn select_strategy(caps: OrientationCapabilities) -> Result<GyroStrategy, GyroError> {
        if caps.native_control {
            Ok(GyroStrategy::Native)
        } else if caps.orientation_events {
            Ok(GyroStrategy::Fallback)
        } else {
            Err(GyroError::CapabilityUnavailable)
        }
    }

    /// Turn gyro on. `permission` is the already-awaited prompt result.
    /// Nothing is registered unless this returns `Ok`. Already-on is a no-op.
    pub fn enable<V, E>(
        &mut self,
        caps: OrientationCapabilities,
        permission: MotionPermission,
        viewer: &V,
        events: &mut E,
        mut sink: impl FnMut(Orientation) + 'static,
    ) -> Result<GyroStrategy, GyroError>
    where
        V: PanoramaViewer,
        E: OrientationEvents<Subscription = S>,
    {
        if let Some(strategy) = self.strategy() {
            return Ok(strategy);
        }
        let strategy = Self::select_strategy(caps)?;
        if !permission.allows() {
            return Err(GyroError::PermissionDenied);
        }
        self.state = match strategy {
            GyroStrategy::Native => {
                viewer.enable_orientation_control();
                GyroState::Native
            }
            GyroStrategy::Fallback => {
                let mut tracker = HeadingTracker::default();
                let subscription = events.subscribe(Box::new(move |reading| {
                    if let Some(orientation) = tracker.convert(reading) {
                        sink(orientation);
                    }
                }));
                GyroState::Fallback(subscription)
            }
        };
        log::info!("[gyro] enabled ({strategy:?})");
        Ok(strategy)
    }

    /// Tear down the active strategy. Dropping the fallback handler discards
    /// its zero heading, so the next enable recalibrates.
    pub fn disable<V, E>(&mut self, viewer: &V, events: &mut E)
    where
        V: PanoramaViewer,
        E: OrientationEvents<Subscription = S>,
    {
        match std::mem::replace(&mut self.state, GyroState::Off) {
            GyroState::Off => return,
            GyroState::Native => viewer.disable_orientation_control(),
            GyroState::Fallback(subscription) => events.unsubscribe(subscription),
        }
        log::info!("[gyro] disabled");
    }
}
