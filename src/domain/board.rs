use crate::domain::item::{ItemId, Lane};
use crate::domain::store::ItemStore;

/// Per-lane ordered id lists derived from the store
///
/// A pure projection of the collection; rebuild it with [`Projections::of`]
/// whenever the collection changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projections {
    todo: Vec<ItemId>,
    in_progress: Vec<ItemId>,
    completed: Vec<ItemId>,
}

impl Projections {
    /// Builds the three lane projections from the store's global sequence
    pub fn of(store: &ItemStore) -> Self {
        let mut projections = Self::default();
        for item in store.items() {
            projections.lane_mut(item.lane).push(item.id);
        }
        projections
    }

    /// The ordered ids of `lane`, global sequence order preserved
    pub fn ids(&self, lane: Lane) -> &[ItemId] {
        match lane {
            Lane::Todo => &self.todo,
            Lane::InProgress => &self.in_progress,
            Lane::Completed => &self.completed,
        }
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut Vec<ItemId> {
        match lane {
            Lane::Todo => &mut self.todo,
            Lane::InProgress => &mut self.in_progress,
            Lane::Completed => &mut self.completed,
        }
    }

    /// An item's rank within `lane`, if it is there
    pub fn index_of(&self, lane: Lane, id: ItemId) -> Option<usize> {
        self.ids(lane).iter().position(|&candidate| candidate == id)
    }

    /// The lane whose projection contains `id`
    pub fn lane_of(&self, id: ItemId) -> Option<Lane> {
        Lane::ALL
            .into_iter()
            .find(|&lane| self.index_of(lane, id).is_some())
    }
}

/// What a drag gesture ended on
///
/// Columns register their lane as a droppable area of their own, so a drop on
/// empty column space reports the lane itself rather than an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Lane(Lane),
    Item(ItemId),
}

impl DropTarget {
    /// The lane owning this target: a lane resolves to itself, an item to the
    /// lane whose projection contains it, anything unknown to None
    pub fn container(&self, projections: &Projections) -> Option<Lane> {
        match self {
            Self::Lane(lane) => Some(*lane),
            Self::Item(id) => projections.lane_of(*id),
        }
    }
}

/// Concrete destination for a resolved drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTarget {
    pub lane: Lane,
    /// 0-based rank within `lane`, counted after removal of the moved item
    pub index: usize,
}

/// Resolves a completed drag gesture into a move instruction
///
/// Returns None for every gesture that should change nothing: no drop target,
/// dropping an item on itself, unresolvable source or target, or a same-lane
/// drop on the item's own position. For a same-lane reorder the destination
/// rank is the over item's current rank; across lanes it is the over item's
/// rank, or the end of the lane when the drop landed on empty column space.
pub fn resolve_move(
    source: ItemId,
    over: Option<DropTarget>,
    projections: &Projections,
) -> Option<MoveTarget> {
    let over = over?;
    if over == DropTarget::Item(source) {
        return None;
    }

    let source_lane = projections.lane_of(source)?;
    let over_lane = over.container(projections)?;

    if source_lane == over_lane {
        let over_id = match over {
            DropTarget::Item(id) => id,
            // Same-lane drop on the column's empty area: nothing to reorder.
            DropTarget::Lane(_) => return None,
        };
        let from_index = projections.index_of(source_lane, source)?;
        let to_index = projections.index_of(source_lane, over_id)?;
        if from_index == to_index {
            return None;
        }
        return Some(MoveTarget {
            lane: source_lane,
            index: to_index,
        });
    }

    let index = match over {
        DropTarget::Item(id) => projections
            .index_of(over_lane, id)
            .unwrap_or_else(|| projections.ids(over_lane).len()),
        DropTarget::Lane(lane) => projections.ids(lane).len(),
    };

    Some(MoveTarget {
        lane: over_lane,
        index,
    })
}

/// Transient marker for a drag in progress
///
/// Purely presentational: the store is never touched while a drag is live.
/// Only a successful [`resolve_move`] followed by
/// [`ItemStore::move_item`](crate::ItemStore::move_item) commits anything;
/// cancellation just discards the marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    active: Option<ItemId>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the item being dragged
    pub fn begin(&mut self, id: ItemId) {
        self.active = Some(id);
    }

    /// The item currently being dragged, if any
    pub fn active(&self) -> Option<ItemId> {
        self.active
    }

    /// Ends the drag, returning the dragged item for resolution
    pub fn complete(&mut self) -> Option<ItemId> {
        self.active.take()
    }

    /// Abandons the drag; the collection is untouched, so nothing to restore
    pub fn cancel(&mut self) {
        self.active = None;
    }
}
