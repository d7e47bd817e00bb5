//! Presentation seam.
//!
//! The graphical layer (board rendering, input capture) lives outside
//! this crate. The core only needs to show a position and obtain one
//! user input; it compares a returned move against the expected solution
//! move itself.

use crate::core::Color;
use crate::tree::Move;

/// One user input at a presented position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserInput {
    /// The trainee played a move.
    Move(Move),
    /// Cooperative abort; not an error.
    Quit,
}

/// Board/input collaborator.
///
/// Calls block the session until the user responds; the only cancellation
/// path is returning `UserInput::Quit`.
pub trait Presenter {
    /// Orient the board for the trainee's side.
    fn set_perspective(&mut self, side: Color);

    /// Display the position reached by `moves` from the starting position.
    fn show_position(&mut self, moves: &[Move]);

    /// Block until the user moves or quits.
    fn read_input(&mut self) -> UserInput;
}
