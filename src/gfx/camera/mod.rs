pub mod orbit_controller;
pub mod rig;
pub mod view_camera;

pub use rig::{CameraMode, CameraRig};
pub use view_camera::{CameraUniform, ViewCamera};
