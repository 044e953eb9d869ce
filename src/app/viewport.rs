//! Sphere viewport for `SphereApp`.
//!
//! Feeds pointer events through the gesture recognizer, paints the sphere and
//! its nodes back-to-front from the last `FrameOutput`, and draws the
//! focused-node pill plus the long-press context panel.

use std::time::Instant;

use egui::{Color32, Pos2, Rect, Stroke};
use glam::Vec2;

use knowledge_sphere::fast_math::lerp;
use knowledge_sphere::mobile::touch::Gesture;
use knowledge_sphere::navigation::HierarchyLevel;
use knowledge_sphere::render::focus::faces_camera;

use super::{to_color32, SphereApp};

/// World-space radius of a node marker
const NODE_RADIUS: f32 = 0.12;
/// Radians of orbit per dragged pixel
const ORBIT_SPEED: f32 = 0.008;

impl SphereApp {
    pub fn draw_viewport(&mut self, ui: &mut egui::Ui) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let size = Vec2::new(rect.width(), rect.height());

        self.handle_pointer(ui, rect, size);

        // Scroll / trackpad pinch to dolly in/out
        if response.hovered() {
            let (scroll, zoom) = ui.input(|i| (i.raw_scroll_delta.y, i.zoom_delta()));
            if scroll.abs() > 0.1 {
                self.scene.camera_mut().zoom(1.0 - scroll * 0.003);
            }
            if (zoom - 1.0).abs() > 1e-3 {
                self.scene.camera_mut().zoom(1.0 / zoom);
            }
        }

        let Some(frame) = self.frame.as_ref() else {
            return;
        };
        let painter = ui.painter_at(rect);
        let view = frame.view;
        let to_screen = |p: Vec2| Pos2::new(rect.min.x + p.x, rect.min.y + p.y);
        let px_per_unit = |depth: f32| size.y * 0.5 / (depth * view.fov_factor);

        // Sphere shell
        let radius = self.scene.config().sphere_radius;
        if let Some(center) = view.project(glam::Vec3::ZERO, size) {
            let r = radius * px_per_unit(view.depth_of(glam::Vec3::ZERO));
            let accent = Color32::from_rgb(52, 211, 153);
            painter.circle_filled(to_screen(center), r, accent.gamma_multiply(0.08));
            painter.circle_stroke(to_screen(center), r, Stroke::new(1.0, accent.gamma_multiply(0.3)));
        }

        // Nodes, far to near
        let mut order: Vec<_> = frame
            .nodes
            .iter()
            .filter_map(|n| Some((n, view.project(n.position, size)?, view.depth_of(n.position))))
            .collect();
        order.sort_by(|a, b| b.2.total_cmp(&a.2));
        let far = order.first().map_or(0.0, |o| o.2);
        let near = order.last().map_or(0.0, |o| o.2);

        let threshold = self.scene.config().facing_threshold;
        for (node, screen, depth) in order {
            let focused = frame.focused.as_ref() == Some(&node.id);
            let facing = faces_camera(node.position, view.eye, threshold);
            let r = NODE_RADIUS * px_per_unit(depth) * if focused { 1.3 } else { 1.0 };
            let fill = node.color.faded(depth_fade(depth, near, far, facing));
            let pos = to_screen(screen);

            painter.circle_filled(pos, r * 1.6, to_color32(fill.faded(0.15)));
            painter.circle_filled(pos, r, to_color32(fill));
            if focused {
                painter.circle_stroke(pos, r * 1.4, Stroke::new(1.5, Color32::WHITE));
            }
        }

        if frame.nodes.is_empty() {
            let hint = match frame.level {
                HierarchyLevel::Root => "Your universe is empty",
                HierarchyLevel::Category | HierarchyLevel::Editor => "No subcategories yet",
            };
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                hint,
                egui::FontId::proportional(16.0),
                Color32::GRAY,
            );
        }

        self.draw_focus_overlay(&painter, rect);
    }

    /// Route raw pointer events through the gesture recognizer.
    fn handle_pointer(&mut self, ui: &egui::Ui, rect: Rect, size: Vec2) {
        const MOUSE: u64 = 0;
        let now = Instant::now();
        let local = |p: Pos2| (p.x - rect.min.x, p.y - rect.min.y);
        let own_layer = ui.layer_id();

        let events = ui.input(|i| i.events.clone());
        let mut gestures = Vec::new();
        for event in events {
            match event {
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    let (x, y) = local(pos);
                    // Presses over a window or panel above the sphere are not ours
                    if pressed && presses_viewport(rect, pos, ui.ctx().layer_id_at(pos), own_layer) {
                        self.gestures.touch_start(x, y, MOUSE, now);
                    } else if !pressed {
                        gestures.push(self.gestures.touch_end(x, y, MOUSE, now));
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    let (x, y) = local(pos);
                    gestures.push(self.gestures.touch_move(x, y, MOUSE));
                }
                _ => {}
            }
        }
        if let Some((x, y)) = self.gestures.check_long_press(now) {
            gestures.push(Gesture::LongPress { x, y });
        }

        for gesture in gestures {
            self.apply_gesture(gesture, size);
        }
    }

    fn apply_gesture(&mut self, gesture: Gesture, size: Vec2) {
        match gesture {
            Gesture::Tap { x, y } => self.open_at(Vec2::new(x, y), size),
            Gesture::DoubleTap { x, y } => {
                // Double-tap on empty space climbs one level
                if self.scene.pick(Vec2::new(x, y), size).is_some() {
                    self.open_at(Vec2::new(x, y), size);
                } else {
                    self.scene.back();
                    self.context_node = None;
                }
            }
            Gesture::LongPress { x, y } => {
                self.context_node = self
                    .scene
                    .pick(Vec2::new(x, y), size)
                    .map(|n| n.id.clone());
            }
            Gesture::Drag { dx, dy } => {
                self.scene.camera_mut().orbit(-dx * ORBIT_SPEED, dy * ORBIT_SPEED);
            }
            Gesture::Pinch { scale } => {
                if scale > 0.0 {
                    self.scene.camera_mut().zoom(1.0 / scale);
                }
            }
            Gesture::None => {}
        }
    }

    /// Activate the node under `screen`, if any.
    fn open_at(&mut self, screen: Vec2, size: Vec2) {
        let Some(id) = self.scene.pick(screen, size).map(|n| n.id.clone()) else {
            return;
        };
        self.status = match self.scene.activate(&id) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("activate {id}: {e}");
                Some(e.to_string())
            }
        };
        self.context_node = None;
    }

    /// Focused-node pill in the top-right corner.
    fn draw_focus_overlay(&self, painter: &egui::Painter, rect: Rect) {
        let label = self.focus_label.borrow();
        let Some(label) = label.as_ref() else {
            return;
        };
        let font = egui::FontId::proportional(13.0);
        let galley = painter.layout_no_wrap(label.name.clone(), font, Color32::from_gray(220));
        let pad = egui::vec2(12.0, 6.0);
        let dot = 10.0;
        let width = galley.size().x + dot + 8.0 + pad.x * 2.0;
        let height = galley.size().y + pad.y * 2.0;
        let pill = Rect::from_min_size(
            Pos2::new(rect.max.x - width - 16.0, rect.min.y + 16.0),
            egui::vec2(width, height),
        );
        painter.rect(
            pill,
            height * 0.5,
            Color32::from_black_alpha(180),
            Stroke::new(1.0, Color32::from_white_alpha(30)),
        );
        let dot_center = Pos2::new(pill.min.x + pad.x + dot * 0.5, pill.center().y);
        painter.circle_filled(dot_center, dot * 0.5, to_color32(label.color));
        let text_pos = Pos2::new(dot_center.x + dot * 0.5 + 8.0, pill.center().y - galley.size().y * 0.5);
        painter.galley(text_pos, galley, Color32::WHITE);
    }

    /// Long-press panel: node details and an Open shortcut.
    pub fn draw_context_panel(&mut self, ctx: &egui::Context) {
        let Some(id) = self.context_node.clone() else {
            return;
        };
        let Some(node) = self.scene.nodes().get(&id).cloned() else {
            self.context_node = None;
            return;
        };

        let mut open = true;
        let mut activate = false;
        egui::Window::new(node.name.clone())
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let kind = if node.is_top_level() { "Category" } else { "Subcategory" };
                ui.label(kind);
                if node.is_top_level() {
                    let n = self.scene.nodes().children_of(&node.id).len();
                    ui.label(format!("{n} subcategories"));
                }
                ui.horizontal(|ui| {
                    ui.label("Color");
                    let (dot, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().circle_filled(dot.center(), 6.0, to_color32(node.color));
                });
                if ui.button("Open").clicked() {
                    activate = true;
                }
            });

        if activate {
            self.status = self.scene.activate(&id).err().map(|e| e.to_string());
            open = false;
        }
        if !open {
            self.context_node = None;
        }
    }
}

/// A press belongs to the viewport only when it lands inside it and no other
/// egui layer (context window, popup) sits on top at that point.
fn presses_viewport(rect: Rect, pos: Pos2, top_layer: Option<egui::LayerId>, own: egui::LayerId) -> bool {
    rect.contains(pos) && top_layer.map_or(true, |layer| layer == own)
}

/// Alpha for a node at `depth`: nearer nodes are brighter, nodes turned away
/// from the camera are dimmed further.
fn depth_fade(depth: f32, near: f32, far: f32, facing: bool) -> f32 {
    let span = far - near;
    let t = if span > f32::EPSILON { ((depth - near) / span).clamp(0.0, 1.0) } else { 0.0 };
    let base = lerp(1.0, 0.7, t);
    if facing {
        base
    } else {
        base * 0.35
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))
    }

    #[test]
    fn press_under_a_window_is_ignored() {
        let own = egui::LayerId::background();
        let window = egui::LayerId::new(egui::Order::Middle, egui::Id::new("node panel"));
        let pos = Pos2::new(400.0, 300.0);
        assert!(presses_viewport(viewport(), pos, Some(own), own));
        assert!(!presses_viewport(viewport(), pos, Some(window), own));
        assert!(!presses_viewport(viewport(), Pos2::new(900.0, 10.0), Some(own), own));
    }

    #[test]
    fn nearer_nodes_are_brighter() {
        let near = depth_fade(2.0, 2.0, 6.0, true);
        let far = depth_fade(6.0, 2.0, 6.0, true);
        assert_eq!(near, 1.0);
        assert!((far - 0.7).abs() < 1e-6);
        assert!(depth_fade(2.0, 2.0, 6.0, false) < far);
        assert_eq!(depth_fade(4.0, 4.0, 4.0, true), 1.0);
    }
}
