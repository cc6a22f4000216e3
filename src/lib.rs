//! # Laneboard Core
//!
//! Core list model and move algorithm for a three-lane task board
//! (To Do / In Progress / Done).
//!
//! The board keeps all items in one flat ordered collection; an item's rank
//! within its lane is simply its position in that sequence filtered by lane,
//! so no separate priority field exists or is persisted. This crate provides
//! the collection and its mutation operations ([`ItemStore`]), the per-lane
//! projections and drag-drop resolution ([`Projections`], [`resolve_move`]),
//! and pluggable key-value persistence ([`Storage`]), without any dependency
//! on a specific UI implementation.

pub mod domain;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{resolve_move, DragState, DropTarget, MoveTarget, Projections},
    item::{Item, ItemId, Lane},
    store::{ItemStore, NameCommit, STORAGE_KEY},
};
pub use error::{BoardError, Result};
pub use storage::Storage;
