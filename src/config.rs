use std::path::{Path, PathBuf};

use eframe::egui::Color32;

pub const STORE_FILE_NAME: &str = "working_weight.csv";

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub background: Color32,
    pub accent: Color32,
    pub accent_fill: Color32,
    pub grid: Color32,
    pub text: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Color32::from_rgb(0x1a, 0x1a, 0x1a),
            accent: Color32::from_rgb(0xbb, 0x86, 0xfc),
            // rgba(187, 134, 252, 0.1)
            accent_fill: Color32::from_rgba_unmultiplied(0xbb, 0x86, 0xfc, 26),
            grid: Color32::from_rgb(0x33, 0x33, 0x33),
            text: Color32::from_rgb(0xe0, 0xe0, 0xe0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub window_size: [f32; 2],
    pub palette: Palette,
}

impl AppConfig {
    pub fn resolve() -> Self {
        AppConfig {
            store_path: resolve_store_path(),
            window_size: [1200.0, 800.0],
            palette: Palette::default(),
        }
    }
}

fn resolve_store_path() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        return home.join(STORE_FILE_NAME);
    }

    tracing::warn!("No home directory found, keeping {} in the working directory", STORE_FILE_NAME);
    Path::new(STORE_FILE_NAME).to_path_buf()
}
