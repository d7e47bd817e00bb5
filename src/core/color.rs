//! Side identification.
//!
//! `Color` doubles as the trainee perspective: a session trains exactly
//! one side of a tree, fixed for the lifetime of that tree.

use serde::{Deserialize, Serialize};

/// One of the two sides of a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The opposing side.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}
