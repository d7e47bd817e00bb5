//! Persistent training records and their note-field codec.

pub mod root;
pub mod training;

pub use root::RootRecord;
pub use training::{Status, TrainingRecord};
