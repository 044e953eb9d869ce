mod app;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eframe::egui;

use knowledge_sphere::config::SceneConfig;
use knowledge_sphere::model::{load_nodes, sample_nodes};

use app::SphereApp;

/// Browse a two-level category hierarchy on a 3D sphere.
#[derive(Debug, Parser)]
#[command(name = "knowledge-sphere", version)]
struct Args {
    /// JSON array of {id, name, color, parent_id} rows; built-in sample when omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// Sphere radius in world units
    #[arg(long)]
    radius: Option<f32>,

    /// Minimum milliseconds between focus label changes
    #[arg(long = "debounce-ms")]
    debounce_ms: Option<u64>,
}

impl Args {
    fn scene_config(&self) -> SceneConfig {
        let mut cfg = SceneConfig::default();
        if let Some(r) = self.radius.filter(|r| r.is_finite() && *r > 0.0) {
            cfg.sphere_radius = r;
        }
        if let Some(ms) = self.debounce_ms {
            cfg.focus_debounce = Duration::from_millis(ms);
        }
        cfg
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = args.scene_config();
    let nodes = match &args.data {
        Some(path) => load_nodes(path)?,
        None => sample_nodes(),
    };
    log::info!(
        "starting with {} nodes ({} categories), radius {}",
        nodes.len(),
        nodes.roots().len(),
        config.sphere_radius
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Knowledge Sphere",
        options,
        Box::new(move |_cc| Ok(Box::new(SphereApp::new(config, nodes)))),
    )?;
    Ok(())
}
