//! Toolbar rendering for `SphereApp`.
//!
//! Draws the back button, the Universe › Category › Subcategory breadcrumb
//! trail, and the last navigation error.

use eframe::egui;

use super::{to_color32, SphereApp};

impl SphereApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            let can_back = self.scene.navigation().active_node().is_some();
            if ui
                .add_enabled(
                    can_back,
                    egui::Button::new("\u{25C0}").min_size(egui::vec2(28.0, 24.0)),
                )
                .clicked()
            {
                self.scene.back();
                self.context_node = None;
            }

            let crumbs = self.scene.navigation().breadcrumbs(self.scene.nodes());
            let mut jump = None;
            for (i, crumb) in crumbs.iter().enumerate() {
                if i > 0 {
                    ui.label(egui::RichText::new("\u{203A}").weak());
                }
                if let Some(color) = crumb.color {
                    let (dot, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                    ui.painter().circle_filled(dot.center(), 4.0, to_color32(color));
                }
                let text = if crumb.current {
                    egui::RichText::new(&crumb.label).strong()
                } else {
                    egui::RichText::new(&crumb.label).weak()
                };
                if ui.add(egui::Button::new(text).frame(false)).clicked() && !crumb.current {
                    jump = Some(crumb.level);
                }
            }
            if let Some(level) = jump {
                self.scene.go_to(level);
                self.context_node = None;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(ref msg) = self.status {
                    ui.colored_label(egui::Color32::from_rgb(239, 68, 68), msg);
                }
            });
        });
    }
}
