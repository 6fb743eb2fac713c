//! # Forest Scene Composition
//!
//! The application-level logic layered on the graphics engine: the one-time
//! scene construction pass, the placement tables it reads from, the
//! per-frame animation math, and the discrete interaction state.

pub mod animation;
pub mod builder;
pub mod interaction;
pub mod layout;

pub use animation::FrameClock;
pub use builder::{build_forest, forest_lights, SceneHandles};
