pub mod logger;
pub mod terminal;

pub use logger::*;
pub use terminal::*;
