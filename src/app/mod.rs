//! `SphereApp`: the top-level egui application state.
//!
//! This module declares the `SphereApp` struct and its constructor.
//! All drawing is split across the sibling sub-modules:
//!
//! - `toolbar`: breadcrumbs, back button, status line
//! - `viewport`: sphere painting, pointer gestures, focus overlay, node panel

pub mod toolbar;
pub mod viewport;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use eframe::egui;

use knowledge_sphere::color::Rgba;
use knowledge_sphere::config::SceneConfig;
use knowledge_sphere::mobile::touch::GestureRecognizer;
use knowledge_sphere::model::{NodeId, NodeSet};
use knowledge_sphere::render::{FrameOutput, SphereScene};

/// What the focus overlay shows: name and color of the focused node.
#[derive(Debug, Clone)]
pub struct FocusLabel {
    pub name: String,
    pub color: Rgba,
}

// ─── Application state ───────────────────────────────────────────────────────

pub struct SphereApp {
    pub scene: SphereScene,
    pub gestures: GestureRecognizer,
    /// Output of the most recent frame (drawn by the viewport)
    pub frame: Option<FrameOutput>,
    /// Written by the focus tracker's change callback
    pub focus_label: Rc<RefCell<Option<FocusLabel>>>,
    /// Node whose context panel is open (long-press)
    pub context_node: Option<NodeId>,
    /// Last navigation error, shown in the toolbar
    pub status: Option<String>,
    pub last_frame_time: Instant,
}

impl SphereApp {
    pub fn new(config: SceneConfig, nodes: NodeSet) -> Self {
        let mut scene = SphereScene::new(config, nodes);

        let focus_label = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&focus_label);
        scene.focus_mut().on_change(move |node| {
            *sink.borrow_mut() = node.map(|n| FocusLabel {
                name: n.name.clone(),
                color: n.color,
            });
        });

        Self {
            scene,
            gestures: GestureRecognizer::new(),
            frame: None,
            focus_label,
            context_node: None,
            status: None,
            last_frame_time: Instant::now(),
        }
    }

    /// Advance the scene by the wall-clock time since the previous frame.
    fn tick(&mut self) {
        let now = Instant::now();
        // Cap dt so a stalled window does not finish a flight in one frame
        let dt = now
            .saturating_duration_since(self.last_frame_time)
            .as_secs_f32()
            .min(0.1);
        self.last_frame_time = now;
        self.frame = Some(self.scene.frame(now, dt));
    }
}

pub fn to_color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

impl eframe::App for SphereApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.context_node.take().is_none() {
            self.scene.back();
        }

        self.tick();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_rgb(8, 12, 16)))
            .show(ctx, |ui| {
                self.draw_viewport(ui);
            });

        self.draw_context_panel(ctx);

        // Camera flights and focus debounce are frame-driven
        ctx.request_repaint();
    }
}
