use egui::{Color32, ColorImage, Pos2};

/// CPU-side drawing surface that keeps everything painted on it until it is
/// explicitly cleared. Sized in physical pixels; drawing calls take UI points
/// and are scaled by `pixels_per_point`.
pub struct Canvas {
    size: [usize; 2],
    pixels_per_point: f32,
    pixels: Vec<Color32>,
}

impl Canvas {
    pub fn new(size: [usize; 2], background: Color32) -> Self {
        Self::with_scale(size, 1.0, background)
    }

    pub fn with_scale(size: [usize; 2], pixels_per_point: f32, background: Color32) -> Self {
        Self {
            size,
            pixels_per_point,
            pixels: vec![background; size[0] * size[1]],
        }
    }

    pub fn size(&self) -> [usize; 2] {
        self.size
    }

    pub fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        if x < self.size[0] && y < self.size[1] {
            Some(self.pixels[y * self.size[0] + x])
        } else {
            None
        }
    }

    pub fn clear(&mut self, background: Color32) {
        self.pixels.fill(background);
    }

    /// Returns true when the surface was reallocated (and therefore wiped).
    pub fn resize(&mut self, size: [usize; 2], pixels_per_point: f32, background: Color32) -> bool {
        if size == self.size && pixels_per_point == self.pixels_per_point {
            return false;
        }
        self.size = size;
        self.pixels_per_point = pixels_per_point;
        self.pixels = vec![background; size[0] * size[1]];
        true
    }

    /// Paints a round point of the given diameter, blending `color`
    /// (premultiplied, as [`Color32`] stores it) over what is already there.
    /// Edge pixels get partial coverage.
    pub fn stroke_point(&mut self, center: Pos2, diameter: f32, color: Color32) {
        let center = Pos2::new(center.x * self.pixels_per_point, center.y * self.pixels_per_point);
        let radius = diameter * 0.5 * self.pixels_per_point;
        if !(radius > 0.0) || color.a() == 0 {
            return;
        }
        let [width, height] = self.size;
        if width == 0 || height == 0 {
            return;
        }

        let min_x = (center.x - radius - 1.0).floor().max(0.0) as usize;
        let min_y = (center.y - radius - 1.0).floor().max(0.0) as usize;
        let max_x = (center.x + radius + 1.0).ceil().min(width as f32 - 1.0);
        let max_y = (center.y + radius + 1.0).ceil().min(height as f32 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as usize, max_y as usize);

        for y in min_y..=max_y {
            let dy = y as f32 + 0.5 - center.y;
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let distance = (dx * dx + dy * dy).sqrt();
                let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let dst = &mut self.pixels[y * width + x];
                    *dst = blend(*dst, color, coverage);
                }
            }
        }
    }

    pub fn to_image(&self) -> ColorImage {
        ColorImage::new(self.size, self.pixels.clone())
    }
}

fn blend(dst: Color32, src: Color32, coverage: f32) -> Color32 {
    let keep = 1.0 - f32::from(src.a()) / 255.0 * coverage;
    let channel = |s: u8, d: u8| -> u8 {
        (f32::from(s) * coverage + f32::from(d) * keep)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Color32::from_rgba_premultiplied(
        channel(src.r(), dst.r()),
        channel(src.g(), dst.g()),
        channel(src.b(), dst.b()),
        channel(src.a(), dst.a()),
    )
}
