pub mod ansi;
pub mod budget;
pub mod config;
pub mod error;
pub mod layout;
pub mod providers;
pub mod render;
pub mod segments;
pub mod symbols;
pub mod themes;
pub mod utils;

pub use config::Config;
pub use error::RenderError;
pub use render::render;
pub use segments::SessionFacts;
pub use symbols::Symbols;
pub use utils::Terminal;
