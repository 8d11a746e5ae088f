pub mod assets;
pub mod constants;
pub mod content;
pub mod engine;
pub mod error;
mod fallback;
pub mod geometry;
pub mod immersive;
pub mod loader;
pub mod model;
pub mod orientation;
pub mod session;
pub mod stereo;
pub mod view;

pub use assets::*;
pub use content::*;
pub use engine::*;
pub use error::*;
pub use geometry::*;
pub use immersive::*;
pub use loader::*;
pub use model::*;
pub use orientation::*;
pub use session::*;
pub use stereo::*;
pub use view::*;
