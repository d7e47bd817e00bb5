//! Core types shared by every component: sides and deterministic RNG.

pub mod color;
pub mod rng;

pub use color::Color;
pub use rng::TrainRng;
