use crate::WheelApp;
use egui::{Key, Sense};
use uuid::Uuid;

enum RowAction {
    Edit(Uuid),
    Commit,
    Cancel,
    Remove(Uuid),
}

/// Entry manager: add, bulk add, edit in place, remove, shuffle and clear.
///
/// Edits go to the live list only; a spin in flight keeps its snapshot.
pub fn entries_panel(app: &mut WheelApp, ui: &mut egui::Ui) {
    ui.heading(format!("Entries ({})", app.entries.len()));

    ui.horizontal(|ui| {
        let response = ui.text_edit_singleline(&mut app.panel.new_entry);
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        if ui.button("Add").clicked() || submitted {
            if app.entries.add(&app.panel.new_entry).is_some() {
                app.panel.new_entry.clear();
            }
            response.request_focus();
        }
    });

    egui::CollapsingHeader::new("Add many (one per line)").show(ui, |ui| {
        ui.text_edit_multiline(&mut app.panel.bulk_text);
        if ui.button("Add all").clicked() {
            let added = app.entries.add_lines(&app.panel.bulk_text);
            log::info!("Added {} entries", added);
            app.panel.bulk_text.clear();
        }
    });

    let mut action: Option<RowAction> = None;
    egui::ScrollArea::vertical()
        .id_salt("entry_list")
        .max_height(240.0)
        .show(ui, |ui| {
            for (index, entry) in app.entries.entries().iter().enumerate() {
                ui.horizontal(|ui| {
                    let swatch_size = egui::vec2(12.0, 12.0);
                    let (swatch, _) = ui.allocate_exact_size(swatch_size, Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, 2.0, app.palette.color_for(index));

                    match app.panel.editing.as_mut().filter(|edit| edit.id == entry.id) {
                        Some(edit) => {
                            let response = ui.text_edit_singleline(&mut edit.text);
                            if !edit.focused {
                                response.request_focus();
                                edit.focused = true;
                            }
                            if response.lost_focus() {
                                action = Some(if ui.input(|i| i.key_pressed(Key::Escape)) {
                                    RowAction::Cancel
                                } else {
                                    RowAction::Commit
                                });
                            }
                        }
                        None => {
                            let name = ui
                                .add(egui::Label::new(&entry.name).sense(Sense::click()))
                                .on_hover_text("Double-click to edit");
                            if name.double_clicked() {
                                action = Some(RowAction::Edit(entry.id));
                            }
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").on_hover_text("Remove").clicked() {
                            action = Some(RowAction::Remove(entry.id));
                        }
                        if ui.small_button("✏").on_hover_text("Edit").clicked() {
                            action = Some(RowAction::Edit(entry.id));
                        }
                    });
                });
            }
        });
    match action {
        Some(RowAction::Edit(id)) => {
            app.commit_entry_edit();
            app.begin_entry_edit(id);
        }
        Some(RowAction::Commit) => {
            app.commit_entry_edit();
        }
        Some(RowAction::Cancel) => app.cancel_entry_edit(),
        Some(RowAction::Remove(id)) => {
            if app.panel.editing.as_ref().is_some_and(|edit| edit.id == id) {
                app.cancel_entry_edit();
            }
            app.entries.remove(id);
        }
        None => {}
    }

    if app.entries.is_empty() {
        ui.weak("Add some entries to spin the wheel.");
    }

    if app.panel.confirm_clear_entries {
        ui.horizontal(|ui| {
            ui.label("Remove all entries?");
            if ui.button("Yes").clicked() {
                app.clear_entries();
            }
            if ui.button("No").clicked() {
                app.panel.confirm_clear_entries = false;
            }
        });
    } else {
        ui.horizontal(|ui| {
            if ui.button("🔀 Shuffle").clicked() {
                app.entries.shuffle(&mut rand::thread_rng());
            }
            let clear = egui::Button::new("🗑 Clear");
            if ui.add_enabled(!app.entries.is_empty(), clear).clicked() {
                app.panel.confirm_clear_entries = true;
            }
        });
    }
}
