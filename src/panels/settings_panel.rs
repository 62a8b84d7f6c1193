use crate::WheelApp;
use crate::config::{
    SPIN_DURATION_RANGE_MS, SPIN_DURATION_STEP_MS, WHEEL_SIZE_RANGE, WHEEL_SIZE_STEP,
};
use egui::Slider;
use std::path::Path;

pub fn settings_panel(app: &mut WheelApp, ui: &mut egui::Ui) {
    ui.heading("Settings");

    ui.horizontal(|ui| {
        ui.label("Spin duration:");
        ui.add(
            Slider::new(&mut app.config.spin_duration_ms, SPIN_DURATION_RANGE_MS)
                .step_by(SPIN_DURATION_STEP_MS as f64)
                .suffix(" ms"),
        );
    });
    ui.horizontal(|ui| {
        ui.label("Wheel size:");
        ui.add(
            Slider::new(&mut app.config.wheel_size, WHEEL_SIZE_RANGE)
                .step_by(WHEEL_SIZE_STEP as f64)
                .suffix(" px"),
        );
    });
    ui.checkbox(&mut app.config.sound_enabled, "Sound effects");
    ui.checkbox(&mut app.config.dark_mode, "Dark mode");

    palette_editor(app, ui);
    transfer_controls(app, ui);
}

fn palette_editor(app: &mut WheelApp, ui: &mut egui::Ui) {
    egui::CollapsingHeader::new("Colours").show(ui, |ui| {
        let mut edited = Vec::new();
        ui.horizontal_wrapped(|ui| {
            for (index, color) in app.palette.colors().iter().enumerate() {
                let mut color = *color;
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    edited.push((index, color));
                }
            }
        });
        for (index, color) in edited {
            app.palette.set(index, color);
        }

        ui.horizontal(|ui| {
            if ui.button("➕ Add colour").clicked() {
                let next = app.palette.color_for(app.palette.len());
                app.palette.push(next);
            }
            if ui
                .add_enabled(app.palette.len() > 1, egui::Button::new("➖ Remove last"))
                .clicked()
            {
                app.palette.remove(app.palette.len() - 1);
            }
            if ui.button("Reset").clicked() {
                app.palette = Default::default();
            }
        });
    });
}

fn transfer_controls(app: &mut WheelApp, ui: &mut egui::Ui) {
    egui::CollapsingHeader::new("Import / export").show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label("File:");
            ui.text_edit_singleline(&mut app.panel.transfer_path);
        });
        ui.horizontal(|ui| {
            let path = Path::new(&app.panel.transfer_path).to_owned();
            if ui.button("Export").clicked() {
                app.panel.status = Some(match app.export_wheel(&path) {
                    Ok(()) => format!("Exported to {}", path.display()),
                    Err(err) => format!("Export failed: {err}"),
                });
            }
            if ui.button("Import").clicked() {
                app.panel.status = Some(match app.import_wheel(&path) {
                    Ok(()) => "Wheel configuration imported".to_owned(),
                    Err(err) => format!("Import failed: {err}"),
                });
            }
        });
        if let Some(status) = &app.panel.status {
            ui.weak(status);
        }
    });
}
