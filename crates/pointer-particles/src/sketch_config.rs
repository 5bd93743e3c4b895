use std::path::PathBuf;

use egui::{Color32, Key};

/// Fixed settings of the sketch. Not editable at runtime; this only gives
/// the constants names.
#[derive(Clone, Debug)]
pub struct SketchConfig {
    pub title: String,
    pub spawn_per_frame: usize,
    pub background_color: Color32,
    pub clear_key: Key,
    pub soundtrack_path: PathBuf,
    pub soundtrack_volume: f32,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            title: "Pointer Particles".to_owned(),
            spawn_per_frame: 10,
            background_color: Color32::WHITE,
            clear_key: Key::A,
            soundtrack_path: PathBuf::from("test.wav"),
            soundtrack_volume: 1.0,
        }
    }
}
