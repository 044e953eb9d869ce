pub mod layout;
pub mod camera;
pub mod focus;
pub mod scene;

pub use camera::{CameraController, CameraState, CameraTarget, CameraView};
pub use focus::FocusTracker;
pub use layout::{fibonacci_sphere, place_nodes, PlacedNode};
pub use scene::{FrameOutput, SphereScene};
