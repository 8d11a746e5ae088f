//! Startup loading: fetched text in, usable [`Tour`] out.

use crate::error::TourError;
use crate::model::Tour;
use std::fmt;

/// Why the fetched document was not used. Both classes recover the same way;
/// the split only exists for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum LoadFailure {
    #[error("tour fetch failed: {0}")]
    Network(String),
    #[error(transparent)]
    Malformed(#[from] TourError),
}

/// Parse a fetch outcome without applying the fallback.
pub fn try_load<E: fmt::Display>(fetched: Result<String, E>) -> Result<Tour, LoadFailure> {
    let text = fetched.map_err(|e| LoadFailure::Network(e.to_string()))?;
    Ok(Tour::from_json(&text)?)
}

/// Parse a fetch outcome, substituting [`Tour::fallback`] wholesale on any failure.
pub fn load_tour<E: fmt::Display>(fetched: Result<String, E>) -> Tour {
    match try_load(fetched) {
        Ok(tour) => {
            log::info!("[tour] loaded {} scene(s)", tour.scenes.len());
            tour
        }
        Err(failure) => {
            log::warn!("[tour] {failure}; using built-in fallback tour");
            Tour::fallback()
        }
    }
}
