#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Wheel of Names")
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Wheel of Names",
        native_options,
        Box::new(|cc| Ok(Box::new(eframe_wheel::WheelApp::new(cc)))),
    )
}

// The web build is driven by the host page; there is nothing to run here.
#[cfg(target_arch = "wasm32")]
fn main() {}
