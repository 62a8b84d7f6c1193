use crate::WheelApp;
use crate::util::time;

pub fn history_panel(app: &mut WheelApp, ui: &mut egui::Ui) {
    ui.heading(format!("History ({})", app.history.len()));

    if app.history.is_empty() {
        ui.weak("No spins yet.");
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("history_list")
        .max_height(200.0)
        .show(ui, |ui| {
            for record in app.history.newest_first() {
                ui.horizontal(|ui| {
                    ui.monospace(time::format_clock(record.timestamp));
                    ui.label(&record.winner);
                });
            }
        });

    egui::CollapsingHeader::new("Wins per name").show(ui, |ui| {
        for (name, count) in app.history.win_counts() {
            ui.label(format!("{name}: {count}"));
        }
    });

    if app.panel.confirm_clear_history {
        ui.horizontal(|ui| {
            ui.label("Clear all history?");
            if ui.button("Yes").clicked() {
                app.history.clear();
                app.panel.confirm_clear_history = false;
            }
            if ui.button("No").clicked() {
                app.panel.confirm_clear_history = false;
            }
        });
    } else if ui.button("Clear history").clicked() {
        app.panel.confirm_clear_history = true;
    }
}
