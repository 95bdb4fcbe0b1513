//! Scribble: draw digits, label them, feed them to a recognition model.

mod app;
mod canvas;
mod command;
mod dialogs;
mod model;
mod strings;

use std::path::PathBuf;

use eframe::egui;
use log::info;

use app::ScribbleApp;
use dialogs::NativeDialogs;
use model::SampleRecorder;

const SAMPLES_FILE: &str = "samples.jsonl";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let samples_path = std::env::current_dir()
        .map(|dir| dir.join(SAMPLES_FILE))
        .unwrap_or_else(|_| PathBuf::from(SAMPLES_FILE));
    info!("collecting samples into {}", samples_path.display());
    let model = Box::new(SampleRecorder::new(samples_path));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_title(strings::APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        strings::APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ScribbleApp::new(model, Box::new(NativeDialogs))))),
    )
    .expect("Failed to run eframe");
}
