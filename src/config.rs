use std::time::Duration;

/// Tunables for the sphere scene: layout radius, camera flight and focus labelling.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Radius of the node sphere (world units)
    pub sphere_radius: f32,
    /// Camera distance from the origin at the root level
    pub root_distance: f32,
    /// Camera distance when hovering over an active category
    pub category_distance: f32,
    /// Camera distance when hovering over an active subcategory
    pub editor_distance: f32,
    /// Exponential damping stiffness (1/s) for camera flights
    pub damping: f32,
    /// Distance below which a flight counts as arrived
    pub arrive_epsilon: f32,
    /// Minimum dot(node normal, node→camera) for a node to face the camera
    pub facing_threshold: f32,
    /// Minimum dot(view dir, camera→node) for a node to be focused
    pub alignment_threshold: f32,
    /// Minimum spacing between two focus changes
    pub focus_debounce: Duration,
    /// User zoom limits
    pub min_distance: f32,
    pub max_distance: f32,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    /// Screen-space radius (px) for click picking
    pub pick_radius: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 2.0,
            root_distance: 6.0,
            category_distance: 3.5,
            editor_distance: 2.8,
            damping: 6.0,
            arrive_epsilon: 0.05,
            facing_threshold: 0.1,
            alignment_threshold: 0.5,
            focus_debounce: Duration::from_millis(100),
            min_distance: 2.5,
            max_distance: 10.0,
            fov_deg: 50.0,
            pick_radius: 24.0,
        }
    }
}
