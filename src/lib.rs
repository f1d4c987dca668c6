// src/lib.rs
pub mod app;
pub mod asset_manager;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logger;
pub mod renderer;
pub mod state;
pub mod viewport;

pub use app::ScaleToScreen;
pub use asset_manager::AssetManager;
pub use config::GameConfig;
pub use error::{Error, Result};
pub use game::{run_game, Flow, Game};
pub use input::{Command, InputState, KeyBindings};
pub use logger::{init_logger_with_config, LoggerConfig};
pub use renderer::Renderer;
pub use state::DisplayState;
pub use viewport::{compute, Cycle, DisplayStrategy, LogicalResolution, Size, Transform};
