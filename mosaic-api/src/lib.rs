//! Mosaic API - Shared types for the Mosaic gallery runtime.

mod event;
mod image;
mod item;
mod ratio;

pub use event::*;
pub use image::*;
pub use item::*;
pub use ratio::*;
