pub mod color;
pub mod config;
pub mod error;
pub mod model;
pub mod navigation;
pub mod render;

// Scalar helpers for the geometry code
pub mod fast_math;

// Pointer / touch gesture recognition
pub mod mobile;
