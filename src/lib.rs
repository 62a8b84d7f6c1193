#![warn(clippy::all, rust_2018_idioms)]

pub mod animation;
pub mod app;
pub mod audio;
pub mod confetti;
pub mod config;
pub mod entry;
pub mod error;
pub mod event;
pub mod feedback;
pub mod history;
pub mod layout;
pub mod palette;
pub mod panels;
pub mod persistence;
pub mod renderer;
pub mod resolver;
pub mod util;

pub use animation::{SpinController, SpinRequest, SpinState};
pub use app::WheelApp;
pub use config::WheelConfig;
pub use entry::{Entry, EntryList, EntrySnapshot};
pub use error::{WheelError, WheelResult};
pub use event::{EventBus, EventHandler, WheelEvent};
pub use layout::WheelLayout;
pub use palette::ColorPalette;
pub use renderer::{TextMeasure, WheelFrame, WheelInput, WheelRenderer};
pub use resolver::resolve;
