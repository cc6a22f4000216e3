pub mod board;
pub mod item;
pub mod store;

pub use board::{resolve_move, DragState, DropTarget, MoveTarget, Projections};
pub use item::{Item, ItemId, Lane};
pub use store::{ItemStore, NameCommit, STORAGE_KEY};
