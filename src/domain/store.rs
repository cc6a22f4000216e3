use crate::{
    domain::item::{Item, ItemId, Lane},
    error::Result,
    storage::Storage,
};
use log::warn;

/// Storage slot for the serialized board
///
/// The version tag in the key literal is the only forward-compatibility
/// mechanism: bumping it orphans data written under the old key.
pub const STORAGE_KEY: &str = "todo-board:list:v1";

/// Verdict of committing edited name text, see [`ItemStore::commit_name`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameCommit {
    /// The trimmed text was saved as the item's name
    Saved(String),
    /// The text trimmed down to empty; the item was left untouched and the
    /// caller decides whether to delete (silently for never-committed items,
    /// after confirmation otherwise)
    WouldDelete,
    /// No item with that id exists
    Unknown,
}

/// The authoritative ordered collection of board items
///
/// Order in the underlying sequence is significant: within any one lane, the
/// relative order of items IS that lane's display order. No operation other
/// than [`ItemStore::move_item`] reorders items, so intra-lane rank never
/// needs a separate field.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Creates a store with no items
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates a store from an existing item sequence, preserving its order
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// The full collection in global sequence order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a new item to the end of the global sequence
    ///
    /// The item lands in the To Do lane and, being last overall, is last
    /// within that lane. Always succeeds.
    pub fn add(&mut self, name: impl Into<String>) -> ItemId {
        let item = Item::new(name);
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Replaces an item's name, refreshing its `updated_at`
    ///
    /// Returns false without touching the collection when the id is unknown.
    pub fn rename(&mut self, id: ItemId, name: impl Into<String>) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.set_name(name);
                true
            }
            None => false,
        }
    }

    /// Removes an item, keeping the relative order of all others
    ///
    /// Returns false when the id is unknown.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Changes an item's lane without touching its global position
    ///
    /// Non-positional lane change; the drag-and-drop path goes through
    /// [`ItemStore::move_item`] instead. Returns false when the id is unknown.
    pub fn set_lane(&mut self, id: ItemId, lane: Lane) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.set_lane(lane);
                true
            }
            None => false,
        }
    }

    /// Moves an item to rank `to_index` within `to_lane`
    ///
    /// `to_index` is 0-based and counted only among items of `to_lane`, after
    /// the moved item has been taken out. The item is removed from the
    /// sequence, re-laned, and inserted back immediately before the item that
    /// currently holds that rank; if `to_lane` has no item at that rank
    /// (index past the end, or an empty lane) the item is appended to the end
    /// of the whole sequence, which makes it last in its lane.
    ///
    /// Returns false when the id is unknown.
    pub fn move_item(&mut self, id: ItemId, to_lane: Lane, to_index: usize) -> bool {
        let Some(pos) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };

        let mut moved = self.items.remove(pos);
        moved.set_lane(to_lane);

        let mut seen_in_lane = 0;
        let mut insert_at = None;
        for (i, item) in self.items.iter().enumerate() {
            if item.lane == to_lane {
                if seen_in_lane == to_index {
                    insert_at = Some(i);
                    break;
                }
                seen_in_lane += 1;
            }
        }

        match insert_at {
            Some(i) => self.items.insert(i, moved),
            None => self.items.push(moved),
        }
        true
    }

    /// Commits text from an in-place name edit
    ///
    /// Trailing newlines are stripped and the text trimmed, matching what the
    /// card editor saves. Non-empty text is saved as the new name; empty text
    /// leaves the item untouched and reports [`NameCommit::WouldDelete`] so
    /// the caller can run its delete flow.
    pub fn commit_name(&mut self, id: ItemId, raw: &str) -> NameCommit {
        if !self.contains(id) {
            return NameCommit::Unknown;
        }

        let trimmed = raw.trim_end_matches('\n').trim();
        if trimmed.is_empty() {
            return NameCommit::WouldDelete;
        }

        self.rename(id, trimmed);
        NameCommit::Saved(trimmed.to_string())
    }

    /// Loads the collection from `storage`
    ///
    /// A missing slot yields the default seed board. Malformed data (invalid
    /// JSON, or JSON that is not an item array) and read failures are logged
    /// and also fall back to the seed; loading never fails.
    pub async fn load(storage: &dyn Storage) -> Self {
        match storage.read(STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Item>>(&raw) {
                Ok(items) => Self::from_items(items),
                Err(err) => {
                    warn!("ignoring malformed board data under {STORAGE_KEY}: {err}");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(err) => {
                warn!("failed to read board data under {STORAGE_KEY}: {err}");
                Self::default()
            }
        }
    }

    /// Writes the collection to `storage` as a single JSON array
    pub async fn save(&self, storage: &dyn Storage) -> Result<()> {
        let json = serde_json::to_string(&self.items)?;
        storage.write(STORAGE_KEY, &json).await
    }

    /// Fire-and-forget save hook, run after every collection change
    ///
    /// Write failures are logged and dropped; the stored copy is a local
    /// cache, not the source of truth for anything else.
    pub async fn persist(&self, storage: &dyn Storage) {
        if let Err(err) = self.save(storage).await {
            warn!("failed to save board data under {STORAGE_KEY}: {err}");
        }
    }
}

impl Default for ItemStore {
    /// A fresh board: one unnamed To Do item waiting to be filled in
    fn default() -> Self {
        Self {
            items: vec![Item::seed()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn store_with(names_and_lanes: &[(&str, Lane)]) -> (ItemStore, Vec<ItemId>) {
        let mut store = ItemStore::empty();
        let mut ids = Vec::new();
        for (name, lane) in names_and_lanes {
            let id = store.add(*name);
            store.set_lane(id, *lane);
            ids.push(id);
        }
        (store, ids)
    }

    fn lane_names(store: &ItemStore, lane: Lane) -> Vec<&str> {
        store
            .items()
            .iter()
            .filter(|item| item.lane == lane)
            .map(|item| item.name.as_str())
            .collect()
    }

    #[test]
    fn test_default_store_is_single_seed() {
        let store = ItemStore::default();
        assert_eq!(store.len(), 1);
        assert!(store.items()[0].is_unnamed());
        assert_eq!(store.items()[0].lane, Lane::Todo);
    }

    #[test]
    fn test_add_appends_to_end() {
        let mut store = ItemStore::empty();
        store.add("first");
        store.add("second");

        assert_eq!(lane_names(&store, Lane::Todo), vec!["first", "second"]);
    }

    #[test]
    fn test_ids_stay_unique_across_operations() {
        let mut store = ItemStore::empty();
        let mut ids = Vec::new();
        for i in 0..20 {
            ids.push(store.add(format!("item {i}")));
        }
        store.move_item(ids[5], Lane::Completed, 0);
        store.move_item(ids[12], Lane::InProgress, 3);
        store.remove(ids[0]);
        store.add("late arrival");

        let unique: HashSet<_> = store.items().iter().map(|item| item.id).collect();
        assert_eq!(unique.len(), store.len());
    }

    #[test]
    fn test_rename_known_and_unknown() {
        let mut store = ItemStore::empty();
        let id = store.add("draft");

        assert!(store.rename(id, "final"));
        assert_eq!(store.get(id).unwrap().name, "final");

        assert!(!store.rename(ItemId::new(), "ghost"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let (mut store, ids) = store_with(&[
            ("a", Lane::Todo),
            ("b", Lane::Todo),
            ("c", Lane::Todo),
        ]);

        assert!(store.remove(ids[1]));
        assert_eq!(lane_names(&store, Lane::Todo), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let (mut store, _) = store_with(&[("a", Lane::Todo)]);
        let snapshot = store.clone();

        assert!(!store.remove(ItemId::new()));
        assert_eq!(store, snapshot);
    }

    #[test]
    fn test_set_lane_keeps_global_position() {
        let (mut store, ids) = store_with(&[
            ("a", Lane::Todo),
            ("b", Lane::Todo),
            ("c", Lane::Todo),
        ]);

        assert!(store.set_lane(ids[1], Lane::Completed));
        let names: Vec<_> = store.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(store.get(ids[1]).unwrap().lane, Lane::Completed);
    }

    #[test]
    fn test_move_into_other_lane_at_rank() {
        // [a:todo, b:todo, c:in-progress]; moving c to To Do rank 1 slots it
        // between a and b.
        let (mut store, ids) = store_with(&[
            ("a", Lane::Todo),
            ("b", Lane::Todo),
            ("c", Lane::InProgress),
        ]);

        assert!(store.move_item(ids[2], Lane::Todo, 1));
        assert_eq!(lane_names(&store, Lane::Todo), vec!["a", "c", "b"]);
        assert!(lane_names(&store, Lane::InProgress).is_empty());
    }

    #[test]
    fn test_move_past_end_appends() {
        let (mut store, ids) = store_with(&[
            ("a", Lane::Todo),
            ("b", Lane::Todo),
            ("c", Lane::Todo),
        ]);

        assert!(store.move_item(ids[0], Lane::Todo, 99));
        assert_eq!(lane_names(&store, Lane::Todo), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_into_empty_lane_ignores_index() {
        let (mut store, ids) = store_with(&[("a", Lane::Todo)]);

        assert!(store.move_item(ids[0], Lane::Completed, 5));
        assert_eq!(lane_names(&store, Lane::Completed), vec!["a"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_move_to_own_rank_keeps_order() {
        let (mut store, ids) = store_with(&[
            ("a", Lane::Todo),
            ("b", Lane::Todo),
            ("c", Lane::Todo),
        ]);

        assert!(store.move_item(ids[1], Lane::Todo, 1));
        assert_eq!(lane_names(&store, Lane::Todo), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_does_not_disturb_other_lane() {
        let (mut store, ids) = store_with(&[
            ("a", Lane::Todo),
            ("x", Lane::Completed),
            ("b", Lane::Todo),
            ("y", Lane::Completed),
            ("c", Lane::Todo),
        ]);

        assert!(store.move_item(ids[4], Lane::Todo, 0));
        assert_eq!(lane_names(&store, Lane::Todo), vec!["c", "a", "b"]);
        assert_eq!(lane_names(&store, Lane::Completed), vec!["x", "y"]);
    }

    #[test]
    fn test_move_unknown_is_noop() {
        let (mut store, _) = store_with(&[("a", Lane::Todo)]);
        let snapshot = store.clone();

        assert!(!store.move_item(ItemId::new(), Lane::Todo, 0));
        assert_eq!(store, snapshot);
    }

    #[test]
    fn test_move_refreshes_updated_at_and_lane() {
        let (mut store, ids) = store_with(&[("a", Lane::Todo)]);
        let before = store.get(ids[0]).unwrap().updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));
        store.move_item(ids[0], Lane::InProgress, 0);

        let item = store.get(ids[0]).unwrap();
        assert_eq!(item.lane, Lane::InProgress);
        assert!(item.updated_at > before);
    }

    #[test]
    fn test_commit_name_saves_trimmed_text() {
        let mut store = ItemStore::empty();
        let id = store.add("");

        let verdict = store.commit_name(id, "  buy milk \n\n");
        assert_eq!(verdict, NameCommit::Saved("buy milk".to_string()));
        assert_eq!(store.get(id).unwrap().name, "buy milk");
    }

    #[test]
    fn test_commit_name_empty_leaves_item_alone() {
        let mut store = ItemStore::empty();
        let id = store.add("keep me");

        let verdict = store.commit_name(id, " \n ");
        assert_eq!(verdict, NameCommit::WouldDelete);
        assert_eq!(store.get(id).unwrap().name, "keep me");
    }

    #[test]
    fn test_commit_name_unknown_id() {
        let mut store = ItemStore::empty();
        assert_eq!(store.commit_name(ItemId::new(), "text"), NameCommit::Unknown);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        use crate::storage::memory_storage::MemoryStorage;

        let storage = MemoryStorage::new();
        let mut store = ItemStore::empty();
        let a = store.add("alpha");
        store.add("beta");
        store.move_item(a, Lane::InProgress, 0);

        store.save(&storage).await.unwrap();
        let loaded = ItemStore::load(&storage).await;

        assert_eq!(loaded, store);
    }

    #[tokio::test]
    async fn test_persist_swallows_write_failure() {
        use crate::{error::BoardError, storage::Storage};
        use async_trait::async_trait;

        struct BrokenStorage;

        #[async_trait]
        impl Storage for BrokenStorage {
            async fn read(&self, _key: &str) -> crate::error::Result<Option<String>> {
                Err(BoardError::StorageError("read failed".to_string()))
            }

            async fn write(&self, _key: &str, _value: &str) -> crate::error::Result<()> {
                Err(BoardError::StorageError("write failed".to_string()))
            }

            async fn clear(&self, _key: &str) -> crate::error::Result<()> {
                Ok(())
            }
        }

        let mut store = ItemStore::empty();
        store.add("unsaved");

        // Logged and dropped, never an error or panic.
        store.persist(&BrokenStorage).await;

        // A broken read falls back to the seed board.
        let loaded = ItemStore::load(&BrokenStorage).await;
        assert_eq!(loaded, ItemStore::default());
    }

    #[test]
    fn test_new_empty_item_delete_on_blur_flow() {
        // Add an empty item, fail to give it a name, delete it on blur: the
        // board ends up exactly as it started.
        let mut store = ItemStore::empty();
        store.add("existing");
        let before = store.len();

        let id = store.add("");
        assert_eq!(store.commit_name(id, ""), NameCommit::WouldDelete);
        assert!(store.get(id).unwrap().is_unnamed());
        assert!(store.remove(id));

        assert_eq!(store.len(), before);
    }
}
