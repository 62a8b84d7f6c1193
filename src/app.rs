use crate::animation::SpinController;
use crate::audio::SoundFeedback;
use crate::confetti::Confetti;
use crate::config::WheelConfig;
use crate::entry::{Entry, EntryList};
use crate::error::WheelResult;
use crate::event::{EventHandler, WheelEvent};
use crate::feedback::PointerFeedback;
use crate::history::SpinHistory;
use crate::layout::WheelLayout;
use crate::palette::ColorPalette;
use crate::panels;
use crate::persistence::{self, DEFAULT_EXPORT_FILE, WheelExport};
use crate::renderer::{WheelInput, WheelRenderer};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// Seconds a winner stays on screen before being removed from the wheel
pub const AUTO_REMOVE_SECS: f64 = 10.0;

/// The most recent winner, shown until dismissed or the countdown runs out
#[derive(Debug, Default)]
pub struct WinnerDisplay {
    winner: Option<Entry>,
    shown_at: Option<f64>,
}

impl WinnerDisplay {
    pub fn current(&self) -> Option<&Entry> {
        self.winner.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.winner = None;
        self.shown_at = None;
    }

    /// Runs the countdown to frame time `now`; the first call after a winner
    /// starts it. Returns true once it has run out.
    pub fn tick(&mut self, now: f64) -> bool {
        if self.winner.is_none() {
            return false;
        }
        let shown_at = *self.shown_at.get_or_insert(now);
        now - shown_at >= AUTO_REMOVE_SECS
    }

    /// Whole seconds left on the countdown, rounded up
    pub fn seconds_left(&self, now: f64) -> u32 {
        let elapsed = self.shown_at.map_or(0.0, |shown_at| now - shown_at);
        (AUTO_REMOVE_SECS - elapsed).clamp(0.0, AUTO_REMOVE_SECS).ceil() as u32
    }
}

impl EventHandler for WinnerDisplay {
    fn handle_event(&mut self, event: &WheelEvent) {
        match event {
            WheelEvent::Winner { entry, .. } => {
                self.winner = Some(entry.clone());
                self.shown_at = None;
            }
            WheelEvent::SpinStarted { .. } => self.dismiss(),
            WheelEvent::SegmentTick { .. } => {}
        }
    }
}

/// A name being edited in place in the entry list
#[derive(Debug, Clone)]
pub struct EntryEdit {
    pub id: Uuid,
    pub text: String,
    pub focused: bool,
}

/// Scratch state for the side panels
#[derive(Debug)]
pub struct PanelState {
    pub new_entry: String,
    pub bulk_text: String,
    pub editing: Option<EntryEdit>,
    pub transfer_path: String,
    pub status: Option<String>,
    pub confirm_clear_entries: bool,
    pub confirm_clear_history: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            new_entry: String::new(),
            bulk_text: String::new(),
            editing: None,
            transfer_path: DEFAULT_EXPORT_FILE.to_owned(),
            status: None,
            confirm_clear_entries: false,
            confirm_clear_history: false,
        }
    }
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
/// The spin itself is never persisted.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct WheelApp {
    pub(crate) entries: EntryList,
    pub(crate) palette: ColorPalette,
    pub(crate) config: WheelConfig,
    pub(crate) history: SpinHistory,

    #[serde(skip)]
    pub(crate) controller: SpinController,
    #[serde(skip)]
    renderer: WheelRenderer,
    #[serde(skip)]
    pointer: PointerFeedback,
    #[serde(skip)]
    sound: SoundFeedback,
    #[serde(skip)]
    confetti: Confetti,
    #[serde(skip)]
    winner: WinnerDisplay,
    #[serde(skip)]
    pub(crate) panel: PanelState,
}

impl Default for WheelApp {
    fn default() -> Self {
        let config = WheelConfig::default();
        Self {
            entries: EntryList::default(),
            palette: ColorPalette::default(),
            controller: SpinController::new(config.spin_duration()),
            pointer: PointerFeedback::new(),
            sound: SoundFeedback::new(config.sound_enabled),
            confetti: Confetti::new(),
            config,
            history: SpinHistory::new(),
            renderer: WheelRenderer::new(),
            winner: WinnerDisplay::default(),
            panel: PanelState::default(),
        }
    }
}

impl WheelApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        if let Err(err) = app.config.validate() {
            log::warn!("Stored settings are invalid ({}), using defaults", err);
            app.config = WheelConfig::default();
        }
        app.config.clamp_to_ui_ranges();
        app.controller.set_spin_duration(app.config.spin_duration());
        app.sound = SoundFeedback::with_output(app.config.sound_enabled);
        log::info!("Wheel ready with {} entries", app.entries.len());
        app
    }

    pub fn entries(&self) -> &EntryList {
        &self.entries
    }

    pub fn is_spinning(&self) -> bool {
        self.controller.is_spinning()
    }

    /// Fire-and-forget spin trigger; ignored while spinning or without entries
    pub fn spin(&mut self) {
        self.controller.request_spin(self.entries.entries());
    }

    /// Closes the winner display, keeping the winner on the wheel
    pub fn dismiss_winner(&mut self) {
        self.winner.dismiss();
        self.confetti.stop();
    }

    /// Removes the shown winner from the live entry list
    pub fn remove_winner(&mut self) {
        if let Some(winner) = self.winner.current() {
            let id = winner.id;
            if let Some(removed) = self.entries.remove(id) {
                log::info!("Removed winner '{}' from the wheel", removed.name);
            }
        }
        self.dismiss_winner();
    }

    /// Removes the winner once the display has been up for
    /// [`AUTO_REMOVE_SECS`]
    pub fn run_winner_countdown(&mut self, now: f64) {
        if self.winner.tick(now) {
            log::info!("Winner countdown elapsed");
            self.remove_winner();
        }
    }

    /// Starts editing `id` in place, seeded with its current name
    pub fn begin_entry_edit(&mut self, id: Uuid) {
        self.panel.editing = self.entries.find(id).map(|entry| EntryEdit {
            id,
            text: entry.name.clone(),
            focused: false,
        });
    }

    /// Renames the entry being edited. Blank text keeps the old name.
    pub fn commit_entry_edit(&mut self) -> bool {
        match self.panel.editing.take() {
            Some(edit) => self.entries.rename(edit.id, &edit.text),
            None => false,
        }
    }

    pub fn cancel_entry_edit(&mut self) {
        self.panel.editing = None;
    }

    /// Empties the entry list after the user confirmed it
    pub fn clear_entries(&mut self) {
        self.entries.clear();
        self.panel.editing = None;
        self.panel.confirm_clear_entries = false;
        log::info!("Cleared all entries");
    }

    pub fn export_wheel(&self, path: &Path) -> WheelResult<()> {
        let export = WheelExport::new(&self.entries, &self.palette, &self.config);
        persistence::export_to_path(path, &export)?;
        Ok(())
    }

    /// Imports a wheel document, replacing whatever parts it carries
    pub fn import_wheel(&mut self, path: &Path) -> WheelResult<()> {
        let export = persistence::import_from_path(path)?;
        let mut config = self.config.clone();
        export.apply(&mut self.entries, &mut self.palette, &mut config);
        config.validate()?;
        config.clamp_to_ui_ranges();
        self.config = config;
        Ok(())
    }

    fn dispatch_events(&mut self) {
        let mut handlers: [&mut dyn EventHandler; 5] = [
            &mut self.history,
            &mut self.pointer,
            &mut self.sound,
            &mut self.confetti,
            &mut self.winner,
        ];
        self.controller.events_mut().dispatch(&mut handlers);
    }

    fn wheel_panel(&mut self, ui: &mut egui::Ui) {
        let spinning = self.controller.is_spinning();
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            let (response, painter) = ui.allocate_painter(
                egui::Vec2::splat(self.config.wheel_size),
                egui::Sense::click(),
            );

            let input = WheelInput {
                entries: self.entries.entries(),
                rotation: self.controller.display_rotation(),
                palette: &self.palette,
                layout: WheelLayout::compute(self.entries.len(), self.config.wheel_size),
                pointer_tilt: self.pointer.tilt(),
            };
            let frame = self.renderer.render(&painter, response.rect, &input);

            let on_wheel = response
                .interact_pointer_pos()
                .is_some_and(|pos| frame.contains(pos));
            if response.clicked() && on_wheel {
                self.spin();
            }
            if response.hovered() && !spinning && !self.entries.is_empty() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }

            ui.add_space(8.0);
            let button = egui::Button::new("Spin (Space)");
            if ui
                .add_enabled(!spinning && !self.entries.is_empty(), button)
                .clicked()
            {
                self.spin();
            }
        });
    }

    fn winner_window(&mut self, ctx: &egui::Context, now: f64) {
        let Some(name) = self.winner.current().map(|entry| entry.name.clone()) else {
            return;
        };
        let seconds = self.winner.seconds_left(now);
        let mut keep = false;
        let mut remove = false;
        egui::Window::new("🎉 Winner!")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(&name);
                    ui.label("Congratulations!");
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        remove = ui.button("Remove from wheel").clicked();
                        keep = ui.button("Keep in wheel").clicked();
                    });
                    ui.add_space(4.0);
                    let plural = if seconds == 1 { "" } else { "s" };
                    ui.weak(format!("Auto-removing winner in {seconds} second{plural}..."));
                });
            });
        if remove {
            self.remove_winner();
        } else if keep {
            self.dismiss_winner();
        }
        // Keeps the countdown label current between input events
        ctx.request_repaint_after(Duration::from_millis(250));
    }

    fn confetti_layer(&mut self, ctx: &egui::Context, dt: f32) -> bool {
        let animating = self.confetti.update(dt, ctx.screen_rect());
        if animating {
            let layer = egui::LayerId::new(egui::Order::Foreground, egui::Id::new("confetti"));
            self.confetti.paint(&ctx.layer_painter(layer));
        }
        animating
    }
}

impl eframe::App for WheelApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.config.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        self.controller.set_spin_duration(self.config.spin_duration());
        self.sound.set_enabled(self.config.sound_enabled);

        let space = ctx.input(|i| i.key_pressed(egui::Key::Space));
        if space && !ctx.wants_keyboard_input() {
            self.spin();
        }

        let (now, dt) = ctx.input(|i| (i.time, i.stable_dt));
        self.controller.advance(now);
        self.dispatch_events();
        self.run_winner_countdown(now);
        let pointer_moving = self.pointer.update(dt);

        egui::SidePanel::right("controls_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    panels::entries_panel(self, ui);
                    ui.separator();
                    panels::settings_panel(self, ui);
                    ui.separator();
                    panels::history_panel(self, ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Wheel of Names");
                ui.label("Enter names, spin the wheel, pick a random winner!");
            });
            self.wheel_panel(ui);
        });

        self.winner_window(ctx, now);
        let confetti_falling = self.confetti_layer(ctx, dt);

        if self.controller.is_spinning() || pointer_moving || confetti_falling {
            ctx.request_repaint();
        }
    }

    /// Teardown: a spin in flight is dropped without a winner.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.cancel();
        self.confetti.stop();
    }
}
