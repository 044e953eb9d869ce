//! Knowledge Sphere: touch-first input
//!
//! Gesture recognition shared by mouse and touch input on the sphere viewport:
//! tap to enter, double-tap to go back, long-press for the node panel,
//! drag to orbit, pinch to zoom.

pub mod touch;
