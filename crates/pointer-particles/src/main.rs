use anyhow::anyhow;
use eframe::NativeOptions;
use pointer_particles::{PointerParticlesApp, SketchConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SketchConfig::default();
    let title = config.title.clone();
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_maximized(true),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        native_options,
        Box::new(|cc| Ok(Box::new(PointerParticlesApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("failed to start native app: {e}"))
}
