pub mod board;
pub mod chat;
pub mod image;
pub mod prefs;

pub use board::*;
pub use chat::*;
pub use image::*;
pub use prefs::*;
