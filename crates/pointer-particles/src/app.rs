use egui::TextureHandle;
use log::info;
use rand::rngs::ThreadRng;

use crate::canvas::Canvas;
use crate::emitter::Emitter;
use crate::noise::PerlinField;
use crate::sketch_config::SketchConfig;
use crate::soundtrack::{load_soundtrack, Soundtrack};

pub struct PointerParticlesApp {
    pub config: SketchConfig,
    pub emitter: Emitter,
    pub canvas: Canvas,
    pub texture: Option<TextureHandle>,
    pub noise: PerlinField,
    pub rng: ThreadRng,
    pub soundtrack: Box<dyn Soundtrack>,
    // frame counter, 1 on the first frame
    pub tick: u64,
}

impl PointerParticlesApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        let soundtrack = load_soundtrack(&config.soundtrack_path, config.soundtrack_volume);
        Self::with_soundtrack(config, soundtrack)
    }

    pub fn with_soundtrack(config: SketchConfig, soundtrack: Box<dyn Soundtrack>) -> Self {
        let mut rng = rand::rng();
        let noise = PerlinField::new(&mut rng);
        info!(
            "sketch ready: {} particles per frame, press {:?} to clear",
            config.spawn_per_frame, config.clear_key
        );
        Self {
            emitter: Emitter::new(config.spawn_per_frame),
            canvas: Canvas::new([0, 0], config.background_color),
            texture: None,
            noise,
            rng,
            soundtrack,
            tick: 0,
            config,
        }
    }
}

impl eframe::App for PointerParticlesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.allocate_rect(rect, egui::Sense::click_and_drag());
                self.fit_canvas(rect, ctx.pixels_per_point());
                self.handle_input(ctx, rect);

                self.tick += 1;
                self.emitter.frame(
                    self.tick,
                    &self.noise,
                    &mut self.rng,
                    self.soundtrack.as_mut(),
                    &mut self.canvas,
                );

                self.paint_canvas(ui, rect);
            });
        // the sketch animates on its own, not just on input
        ctx.request_repaint();
    }
}

// Input and canvas helpers are in `src/ui.rs`.
