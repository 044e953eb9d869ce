//! Per-frame pipeline: layout → camera → focus, in that order.
//!
//! `SphereScene` owns every piece of per-surface state (placement caches,
//! camera animation, focus debounce, navigation). It is created when the
//! viewport mounts and dropped with it.

use std::time::Instant;

use glam::{Vec2, Vec3};

use crate::config::SceneConfig;
use crate::error::NavigationError;
use crate::model::{NodeId, NodeSet};
use crate::navigation::{HierarchyLevel, Navigation};
use crate::render::camera::{CameraController, CameraTarget, CameraView};
use crate::render::focus::{faces_camera, FocusTracker};
use crate::render::layout::{place_nodes, PlacedNode};

/// Everything the surface needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub view: CameraView,
    pub level: HierarchyLevel,
    /// Nodes of the visible ring, with positions for this frame
    pub nodes: Vec<PlacedNode>,
    pub focused: Option<NodeId>,
}

pub struct SphereScene {
    config: SceneConfig,
    nodes: NodeSet,
    navigation: Navigation,
    /// Top-level categories, placed
    roots: Vec<PlacedNode>,
    /// Subcategories of the active category, placed
    children: Vec<PlacedNode>,
    children_of: Option<NodeId>,
    layout_dirty: bool,
    camera: CameraController,
    focus: FocusTracker,
}

impl SphereScene {
    pub fn new(config: SceneConfig, nodes: NodeSet) -> Self {
        let camera = CameraController::new(&config);
        let focus = FocusTracker::new(&config);
        Self {
            config,
            nodes,
            navigation: Navigation::new(),
            roots: Vec::new(),
            children: Vec::new(),
            children_of: None,
            layout_dirty: true,
            camera,
            focus,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn focus_mut(&mut self) -> &mut FocusTracker {
        &mut self.focus
    }

    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    /// Replace the node list (fresh data from the collaborator). Positions
    /// are recomputed on the next frame; navigation drops levels whose
    /// active node disappeared.
    pub fn set_nodes(&mut self, nodes: NodeSet) {
        self.nodes = nodes;
        self.layout_dirty = true;
        if self.navigation.prune(&self.nodes) {
            self.focus.clear();
        }
    }

    /// Click on a node: descend one level if `id` belongs to the visible ring.
    pub fn activate(&mut self, id: &NodeId) -> Result<(), NavigationError> {
        match self.navigation.level() {
            HierarchyLevel::Root => self.navigation.enter_category(&self.nodes, id)?,
            HierarchyLevel::Category => self.navigation.enter_editor(&self.nodes, id)?,
            HierarchyLevel::Editor => {
                // Switching subcategory from the editor: step back, then in.
                // A refused switch leaves the editor where it was.
                let previous = self.navigation.clone();
                self.navigation.back();
                if let Err(e) = self.navigation.enter_editor(&self.nodes, id) {
                    self.navigation = previous;
                    return Err(e);
                }
            }
        }
        self.focus.clear();
        Ok(())
    }

    /// Up one level. Returns false at Root.
    pub fn back(&mut self) -> bool {
        let moved = self.navigation.back();
        if moved {
            self.focus.clear();
        }
        moved
    }

    /// Breadcrumb jump.
    pub fn go_to(&mut self, level: HierarchyLevel) {
        let before = self.navigation.level();
        self.navigation.go_to(level);
        if before != self.navigation.level() {
            self.focus.clear();
        }
    }

    /// Nodes on the visible ring for the current level.
    pub fn visible(&self) -> &[PlacedNode] {
        match self.navigation.level() {
            HierarchyLevel::Root => &self.roots,
            HierarchyLevel::Category | HierarchyLevel::Editor => &self.children,
        }
    }

    /// Run one frame.
    pub fn frame(&mut self, now: Instant, dt: f32) -> FrameOutput {
        self.refresh_layout();

        let target = CameraTarget::for_level(
            self.navigation.level(),
            self.active_position(),
            &self.config,
        );
        let view = self.camera.step(dt, target);

        let visible = match self.navigation.level() {
            HierarchyLevel::Root => &self.roots,
            HierarchyLevel::Category | HierarchyLevel::Editor => &self.children,
        };
        self.focus.update(now, view.eye, view.forward, visible);

        FrameOutput {
            view,
            level: self.navigation.level(),
            nodes: visible.clone(),
            focused: self.focus.focused().cloned(),
        }
    }

    /// Nearest visible node under `screen` (pixels, viewport of `size`),
    /// limited to nodes in front of the camera and facing it.
    pub fn pick(&self, screen: Vec2, size: Vec2) -> Option<&PlacedNode> {
        let view = self.camera.view();
        let radius_sq = self.config.pick_radius * self.config.pick_radius;
        self.visible()
            .iter()
            .filter(|n| faces_camera(n.position, view.eye, self.config.facing_threshold))
            .filter_map(|n| {
                let p = view.project(n.position, size)?;
                let d = p.distance_squared(screen);
                (d <= radius_sq).then_some((n, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(n, _)| n)
    }

    /// Recompute placements when the sibling set or the active category changed.
    fn refresh_layout(&mut self) {
        let active = self.navigation.active_category().cloned();
        if !self.layout_dirty && active == self.children_of {
            return;
        }
        let radius = self.config.sphere_radius;
        self.roots = place_nodes(&self.nodes.roots(), radius);
        self.children = match &active {
            Some(id) => place_nodes(&self.nodes.children_of(id), radius),
            None => Vec::new(),
        };
        log::debug!(
            "layout: {} categories, {} subcategories",
            self.roots.len(),
            self.children.len()
        );
        self.children_of = active;
        self.layout_dirty = false;
    }

    /// Position of the node the camera should hover over.
    fn active_position(&self) -> Option<Vec3> {
        let find = |ring: &[PlacedNode], id: &NodeId| {
            ring.iter().find(|n| &n.id == id).map(|n| n.position)
        };
        match self.navigation.level() {
            HierarchyLevel::Root => None,
            HierarchyLevel::Category => find(self.roots.as_slice(), self.navigation.active_category()?),
            HierarchyLevel::Editor => find(self.children.as_slice(), self.navigation.active_subcategory()?),
        }
    }
}
