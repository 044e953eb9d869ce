//! Focus Tracker: which node sits closest to dead-center of the view.
//!
//! A node is a candidate when it is in front of the camera and on the
//! hemisphere facing it. The candidate best aligned with the view direction
//! wins if the alignment clears the threshold. Changes (including to "none")
//! are applied at most once per debounce window, and the change callback
//! fires only when the focused id actually differs.

use std::time::{Duration, Instant};

use glam::Vec3;

use crate::config::SceneConfig;
use crate::fast_math::safe_normalize;
use crate::model::NodeId;
use crate::render::layout::PlacedNode;

type FocusCallback = Box<dyn FnMut(Option<&PlacedNode>)>;

pub struct FocusTracker {
    focused: Option<NodeId>,
    last_change: Option<Instant>,
    debounce: Duration,
    facing_threshold: f32,
    alignment_threshold: f32,
    on_change: Option<FocusCallback>,
}

impl std::fmt::Debug for FocusTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusTracker")
            .field("focused", &self.focused)
            .field("last_change", &self.last_change)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

impl FocusTracker {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            focused: None,
            last_change: None,
            debounce: config.focus_debounce,
            facing_threshold: config.facing_threshold,
            alignment_threshold: config.alignment_threshold,
            on_change: None,
        }
    }

    /// Register the focused-node-changed listener (replaces any previous one).
    pub fn on_change(&mut self, callback: impl FnMut(Option<&PlacedNode>) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn focused(&self) -> Option<&NodeId> {
        self.focused.as_ref()
    }

    /// Forget the current focus immediately, e.g. when the node set is
    /// swapped by a level change. Notifies if something was focused.
    pub fn clear(&mut self) {
        if self.focused.take().is_some() {
            self.last_change = None;
            if let Some(cb) = self.on_change.as_mut() {
                cb(None);
            }
        }
    }

    /// Best-aligned visible node for this camera, ignoring debounce.
    pub fn candidate<'a>(
        &self,
        eye: Vec3,
        forward: Vec3,
        nodes: &'a [PlacedNode],
    ) -> Option<&'a PlacedNode> {
        let forward = safe_normalize(forward)?;
        if !eye.is_finite() {
            return None;
        }
        let mut best: Option<(&PlacedNode, f32)> = None;
        for node in nodes {
            let p = node.position;
            if !p.is_finite() {
                continue;
            }
            let to_node = p - eye;
            // (a) in front of the camera
            if to_node.dot(forward) <= 0.0 {
                continue;
            }
            // (b) on the hemisphere facing the camera
            if !faces_camera(p, eye, self.facing_threshold) {
                continue;
            }
            let Some(dir) = safe_normalize(to_node) else { continue };
            let alignment = dir.dot(forward);
            if best.map_or(true, |(_, a)| alignment > a) {
                best = Some((node, alignment));
            }
        }
        best.filter(|&(_, a)| a > self.alignment_threshold)
            .map(|(node, _)| node)
    }

    /// Re-evaluate focus for this frame. Returns true if the focus changed
    /// (the callback has then been invoked once).
    pub fn update(&mut self, now: Instant, eye: Vec3, forward: Vec3, nodes: &[PlacedNode]) -> bool {
        let winner = self.candidate(eye, forward, nodes);
        if winner.map(|n| &n.id) == self.focused.as_ref() {
            return false;
        }
        if let Some(last) = self.last_change {
            if now.saturating_duration_since(last) < self.debounce {
                return false;
            }
        }

        self.focused = winner.map(|n| n.id.clone());
        self.last_change = Some(now);
        log::debug!(
            "focus: {}",
            winner.map_or("<none>", |n| n.name.as_str())
        );
        if let Some(cb) = self.on_change.as_mut() {
            cb(winner);
        }
        true
    }
}

/// Node lies on the sphere hemisphere facing `eye`: its outward normal and
/// the direction back to the camera agree by more than `threshold`.
pub fn faces_camera(position: Vec3, eye: Vec3, threshold: f32) -> bool {
    let (Some(normal), Some(to_cam)) = (safe_normalize(position), safe_normalize(eye - position))
    else {
        return false;
    };
    normal.dot(to_cam) > threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::color::Rgba;

    fn placed(id: &str, position: Vec3) -> PlacedNode {
        PlacedNode {
            id: NodeId::from(id),
            name: id.to_owned(),
            color: Rgba::WHITE,
            position,
        }
    }

    fn recorder(tracker: &mut FocusTracker) -> Rc<RefCell<Vec<Option<String>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        tracker.on_change(move |n| sink.borrow_mut().push(n.map(|n| n.id.0.clone())));
        log
    }

    const EYE: Vec3 = Vec3::new(0.0, 0.0, 6.0);

    #[test]
    fn front_node_wins_back_node_never() {
        let cfg = SceneConfig::default();
        let mut tracker = FocusTracker::new(&cfg);
        let events = recorder(&mut tracker);
        let nodes = [
            placed("back", Vec3::new(0.0, 0.0, -2.0)),
            placed("front", Vec3::new(0.0, 0.0, 2.0)),
        ];
        let t0 = Instant::now();
        for i in 0..20 {
            tracker.update(t0 + Duration::from_millis(i * 16), EYE, Vec3::NEG_Z, &nodes);
        }
        assert_eq!(tracker.focused(), Some(&NodeId::from("front")));
        assert_eq!(*events.borrow(), vec![Some("front".to_owned())]);
    }

    #[test]
    fn back_node_alone_is_never_focused() {
        let cfg = SceneConfig::default();
        let tracker = FocusTracker::new(&cfg);
        let nodes = [placed("back", Vec3::new(0.0, 0.0, -2.0))];
        assert!(tracker.candidate(EYE, Vec3::NEG_Z, &nodes).is_none());
    }

    #[test]
    fn behind_camera_is_ignored() {
        let cfg = SceneConfig::default();
        let tracker = FocusTracker::new(&cfg);
        // On the facing hemisphere but behind the eye
        let nodes = [placed("behind", Vec3::new(0.0, 0.0, 2.0))];
        let eye = Vec3::new(0.0, 0.0, 1.0);
        assert!(tracker.candidate(eye, Vec3::NEG_Z, &nodes).is_none());
    }

    #[test]
    fn alignment_threshold_applies() {
        let cfg = SceneConfig::default();
        let tracker = FocusTracker::new(&cfg);
        let nodes = [placed("side", Vec3::new(2.0, 0.0, 0.0))];
        // In front, but only ~72° off-axis: alignment 0.32
        assert!(tracker.candidate(Vec3::new(3.0, 0.0, 3.0), Vec3::NEG_X, &nodes).is_none());
        // Looking right at it
        let at = (Vec3::new(2.0, 0.0, 0.0) - Vec3::new(3.0, 0.0, 3.0)).normalize();
        assert!(tracker.candidate(Vec3::new(3.0, 0.0, 3.0), at, &nodes).is_some());
    }

    #[test]
    fn picks_most_centered() {
        let cfg = SceneConfig::default();
        let tracker = FocusTracker::new(&cfg);
        let nodes = [
            placed("off", Vec3::new(0.8, 0.0, 1.8)),
            placed("center", Vec3::new(0.05, 0.0, 1.99)),
        ];
        let best = tracker.candidate(EYE, Vec3::NEG_Z, &nodes).unwrap();
        assert_eq!(best.id.as_str(), "center");
    }

    #[test]
    fn oscillation_is_debounced() {
        let cfg = SceneConfig::default();
        let mut tracker = FocusTracker::new(&cfg);
        let events = recorder(&mut tracker);
        let nodes = [
            placed("left", Vec3::new(-0.6, 0.0, 1.9)),
            placed("right", Vec3::new(0.6, 0.0, 1.9)),
        ];
        let look_left = (nodes[0].position - EYE).normalize();
        let look_right = (nodes[1].position - EYE).normalize();

        let t0 = Instant::now();
        let mut changes = Vec::new();
        // Flip direction every 30 ms for one second
        for i in 0..34u64 {
            let now = t0 + Duration::from_millis(i * 30);
            let forward = if i % 2 == 0 { look_left } else { look_right };
            if tracker.update(now, EYE, forward, &nodes) {
                changes.push(now);
            }
        }
        assert!(changes.len() > 1);
        for pair in changes.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(100));
        }
        assert_eq!(events.borrow().len(), changes.len());
    }

    #[test]
    fn losing_focus_is_debounced_too() {
        let cfg = SceneConfig::default();
        let mut tracker = FocusTracker::new(&cfg);
        let nodes = [placed("front", Vec3::new(0.0, 0.0, 2.0))];
        let t0 = Instant::now();
        assert!(tracker.update(t0, EYE, Vec3::NEG_Z, &nodes));
        // Look away 50 ms later: still within the window
        assert!(!tracker.update(t0 + Duration::from_millis(50), EYE, Vec3::X, &nodes));
        assert_eq!(tracker.focused(), Some(&NodeId::from("front")));
        assert!(tracker.update(t0 + Duration::from_millis(120), EYE, Vec3::X, &nodes));
        assert_eq!(tracker.focused(), None);
    }

    #[test]
    fn no_nodes_never_notifies() {
        let cfg = SceneConfig::default();
        let mut tracker = FocusTracker::new(&cfg);
        let events = recorder(&mut tracker);
        let t0 = Instant::now();
        for i in 0..50 {
            assert!(!tracker.update(t0 + Duration::from_millis(i * 16), EYE, Vec3::NEG_Z, &[]));
        }
        assert_eq!(tracker.focused(), None);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn nan_input_degrades_to_no_focus() {
        let cfg = SceneConfig::default();
        let tracker = FocusTracker::new(&cfg);
        let nodes = [
            placed("nan", Vec3::splat(f32::NAN)),
            placed("front", Vec3::new(0.0, 0.0, 2.0)),
        ];
        assert_eq!(
            tracker.candidate(EYE, Vec3::NEG_Z, &nodes).map(|n| n.id.as_str()),
            Some("front")
        );
        assert!(tracker.candidate(EYE, Vec3::splat(f32::NAN), &nodes).is_none());
        assert!(tracker.candidate(Vec3::splat(f32::NAN), Vec3::NEG_Z, &nodes).is_none());
    }
}
