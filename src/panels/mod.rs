mod entries_panel;
mod history_panel;
mod settings_panel;

pub use entries_panel::entries_panel;
pub use history_panel::history_panel;
pub use settings_panel::settings_panel;
