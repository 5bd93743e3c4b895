use egui::{Color32, Pos2, Rect, TextureOptions};
use log::debug;

use crate::app::PointerParticlesApp;

/// Maps a screen position into canvas space.
pub fn to_canvas(rect: Rect, pos: Pos2) -> Pos2 {
    Pos2::new(pos.x - rect.left(), pos.y - rect.top())
}

/// Physical pixel size of a canvas covering `rect`.
pub fn canvas_size(rect: Rect, pixels_per_point: f32) -> [usize; 2] {
    [
        (rect.width() * pixels_per_point).round().max(1.0) as usize,
        (rect.height() * pixels_per_point).round().max(1.0) as usize,
    ]
}

impl PointerParticlesApp {
    pub fn fit_canvas(&mut self, rect: Rect, pixels_per_point: f32) {
        let size = canvas_size(rect, pixels_per_point);
        if self
            .canvas
            .resize(size, pixels_per_point, self.config.background_color)
        {
            debug!("canvas resized to {}x{}", size[0], size[1]);
        }
    }

    pub fn handle_input(&mut self, ctx: &egui::Context, rect: Rect) {
        let clear_key = self.config.clear_key;
        let (pressed, released, latest, clear) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
                // lower-case only
                i.key_pressed(clear_key) && !i.modifiers.shift,
            )
        });

        if let Some(pos) = latest {
            self.emitter.move_pointer(to_canvas(rect, pos));
        }
        if pressed && latest.is_some_and(|p| rect.contains(p)) {
            self.emitter.press();
        }
        if released {
            self.emitter.release();
        }
        if clear {
            self.emitter
                .clear_all(&mut self.canvas, self.config.background_color);
        }
    }

    pub fn paint_canvas(&mut self, ui: &egui::Ui, rect: Rect) {
        let image = self.canvas.to_image();
        if let Some(texture) = &mut self.texture {
            texture.set(image, TextureOptions::LINEAR);
        } else {
            self.texture = Some(ui.ctx().load_texture("canvas", image, TextureOptions::LINEAR));
        }
        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            ui.painter().image(texture.id(), rect, uv, Color32::WHITE);
        }
    }
}
