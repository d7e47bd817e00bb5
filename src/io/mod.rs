//! External collaborator seams and their in-memory implementations.

pub mod collection;
pub mod memory;
pub mod presentation;
pub mod storage;

pub use collection::{Catalog, GroupStats};
pub use memory::{MemoryStore, ScriptedPresenter};
pub use presentation::{Presenter, UserInput};
pub use storage::{TreeId, TreeStore};
