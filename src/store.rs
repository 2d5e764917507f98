//! Gallery state store: the ordered block list and the dirty set.
//!
//! Every mutation addresses a block by its stable id and marks that block
//! dirty; the flag is cleared only by a successful save of that exact id.
//! Capacity and addressing failures are surfaced as [`Rejection`] values
//! instead of silent no-ops, but state is left untouched in those cases.

use crate::constants::{MAX_BLOCKS, MAX_MEDIA_PER_BLOCK};
use crate::media::{CollectionBlock, MediaItem};
use std::collections::HashSet;

/// Why a mutation was refused. State is unchanged whenever one is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The gallery already holds the maximum number of blocks.
    BlockLimit,
    /// The addressed block already holds the maximum number of media items.
    MediaLimit,
    /// No block with the given id exists.
    UnknownBlock,
    /// The media index is out of range for the addressed block.
    UnknownMedia,
}

impl Rejection {
    pub fn describe(&self) -> String {
        match self {
            Rejection::BlockLimit => format!("Block limit reached ({MAX_BLOCKS})"),
            Rejection::MediaLimit => format!("Slide limit reached ({MAX_MEDIA_PER_BLOCK})"),
            Rejection::UnknownBlock => "No such collection".to_string(),
            Rejection::UnknownMedia => "No such slide".to_string(),
        }
    }
}

pub struct GalleryStore {
    blocks: Vec<CollectionBlock>,
    dirty: HashSet<String>,
    /// 1-based number handed to the next seeded or added block.
    next_block_number: usize,
    seed_media_count: usize,
}

impl GalleryStore {
    /// Seeds `block_count` blocks of `media_count` placeholder slides each,
    /// both clamped to the capacity bounds so a permissive config cannot
    /// seed past them. Seeded content is considered persisted, so nothing
    /// starts dirty.
    pub fn seeded(block_count: usize, media_count: usize) -> Self {
        let block_count = block_count.min(MAX_BLOCKS);
        let media_count = media_count.min(MAX_MEDIA_PER_BLOCK);
        let blocks = (1..=block_count)
            .map(|n| CollectionBlock::seeded(n, media_count))
            .collect();
        Self {
            blocks,
            dirty: HashSet::new(),
            next_block_number: block_count + 1,
            seed_media_count: media_count,
        }
    }

    pub fn blocks(&self) -> &[CollectionBlock] {
        &self.blocks
    }

    pub fn block(&self, id: &str) -> Option<&CollectionBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    // Asynchronous completions re-enter through here by id, never through a
    // captured index, so a completion that arrives after the user navigated
    // away still lands on the right block.
    fn block_mut(&mut self, id: &str) -> Option<&mut CollectionBlock> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn is_dirty(&self, id: &str) -> bool {
        self.dirty.contains(id)
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Appends a freshly seeded block. Returns its id.
    pub fn add_block(&mut self) -> Result<String, Rejection> {
        if self.blocks.len() >= MAX_BLOCKS {
            return Err(Rejection::BlockLimit);
        }
        let block = CollectionBlock::seeded(self.next_block_number, self.seed_media_count);
        self.next_block_number += 1;
        let id = block.id.clone();
        self.dirty.insert(id.clone());
        self.blocks.push(block);
        Ok(id)
    }

    /// Appends `item` to the block's media list (insertion order is display
    /// order).
    pub fn add_media(&mut self, block_id: &str, item: MediaItem) -> Result<(), Rejection> {
        let block = self.block_mut(block_id).ok_or(Rejection::UnknownBlock)?;
        if block.media.len() >= MAX_MEDIA_PER_BLOCK {
            return Err(Rejection::MediaLimit);
        }
        block.media.push(item);
        self.dirty.insert(block_id.to_string());
        Ok(())
    }

    /// Appends one placeholder slide (the "Add Slide" action).
    pub fn add_slide(&mut self, block_id: &str) -> Result<(), Rejection> {
        let next = self
            .block(block_id)
            .ok_or(Rejection::UnknownBlock)?
            .media
            .len()
            + 1;
        self.add_media(block_id, MediaItem::placeholder(next))
    }

    pub fn set_cover(&mut self, block_id: &str, item: MediaItem) -> Result<(), Rejection> {
        let block = self.block_mut(block_id).ok_or(Rejection::UnknownBlock)?;
        block.cover_media = item;
        self.dirty.insert(block_id.to_string());
        Ok(())
    }

    /// Inserts `tag` into the media's tag set. A duplicate insert succeeds
    /// without changing anything, including the dirty set.
    pub fn add_tag(
        &mut self,
        block_id: &str,
        media_index: usize,
        tag: &str,
    ) -> Result<(), Rejection> {
        let block = self.block_mut(block_id).ok_or(Rejection::UnknownBlock)?;
        let item = block.media.get_mut(media_index).ok_or(Rejection::UnknownMedia)?;
        if item.add_tag(tag) {
            self.dirty.insert(block_id.to_string());
        }
        Ok(())
    }

    /// Removes `tag` by value; absent tags are a no-op that leaves the dirty
    /// set alone.
    pub fn remove_tag(
        &mut self,
        block_id: &str,
        media_index: usize,
        tag: &str,
    ) -> Result<(), Rejection> {
        let block = self.block_mut(block_id).ok_or(Rejection::UnknownBlock)?;
        let item = block.media.get_mut(media_index).ok_or(Rejection::UnknownMedia)?;
        if item.remove_tag(tag) {
            self.dirty.insert(block_id.to_string());
        }
        Ok(())
    }

    /// Upserts a metadata entry, last write wins.
    pub fn set_metadata(
        &mut self,
        block_id: &str,
        media_index: usize,
        key: &str,
        value: &str,
    ) -> Result<(), Rejection> {
        let block = self.block_mut(block_id).ok_or(Rejection::UnknownBlock)?;
        let item = block.media.get_mut(media_index).ok_or(Rejection::UnknownMedia)?;
        item.metadata.insert(key.to_string(), value.to_string());
        self.dirty.insert(block_id.to_string());
        Ok(())
    }

    /// Applies the outcome of a save call. Success clears exactly that block's
    /// dirty flag; failure leaves the whole dirty set untouched so the user
    /// can retry.
    pub fn apply_save_result(&mut self, block_id: &str, success: bool) {
        if success {
            self.dirty.remove(block_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;

    fn store() -> GalleryStore {
        GalleryStore::seeded(6, 10)
    }

    #[test]
    fn seeding_matches_requested_shape() {
        let store = store();
        assert_eq!(store.blocks().len(), 6);
        assert!(store.blocks().iter().all(|b| b.media.len() == 10));
        assert_eq!(store.dirty_count(), 0);
        assert_eq!(store.blocks()[2].id, "collection-3");
    }

    #[test]
    fn seeding_clamps_to_capacity_bounds() {
        let store = GalleryStore::seeded(99, 50);
        assert_eq!(store.blocks().len(), MAX_BLOCKS);
        assert!(store
            .blocks()
            .iter()
            .all(|b| b.media.len() == MAX_MEDIA_PER_BLOCK));

        // Blocks minted later reuse the seed shape, clamped the same way.
        let mut store = GalleryStore::seeded(1, 50);
        let id = store.add_block().unwrap();
        assert_eq!(store.block(&id).unwrap().media.len(), MAX_MEDIA_PER_BLOCK);
    }

    #[test]
    fn add_media_grows_list_and_marks_dirty() {
        let mut store = store();
        let id = store.blocks()[0].id.clone();
        let before = store.block(&id).unwrap().media.len();

        store
            .add_media(&id, MediaItem::image("data:image/png;base64,".into(), "a".into()))
            .unwrap();

        assert_eq!(store.block(&id).unwrap().media.len(), before + 1);
        assert!(store.is_dirty(&id));
    }

    #[test]
    fn add_media_at_capacity_is_rejected_without_side_effects() {
        let mut store = GalleryStore::seeded(1, MAX_MEDIA_PER_BLOCK);
        let id = store.blocks()[0].id.clone();

        let result = store.add_media(&id, MediaItem::placeholder(99));

        assert_eq!(result, Err(Rejection::MediaLimit));
        assert_eq!(store.block(&id).unwrap().media.len(), MAX_MEDIA_PER_BLOCK);
        assert!(!store.is_dirty(&id));
    }

    #[test]
    fn add_block_caps_at_limit() {
        let mut full = GalleryStore::seeded(MAX_BLOCKS, 1);
        assert_eq!(full.add_block(), Err(Rejection::BlockLimit));
        assert_eq!(full.blocks().len(), MAX_BLOCKS);

        let mut store = store();
        let id = store.add_block().unwrap();
        assert_eq!(id, "collection-7");
        assert_eq!(store.blocks().len(), 7);
        assert!(store.is_dirty(&id));
    }

    #[test]
    fn unknown_block_is_rejected() {
        let mut store = store();
        assert_eq!(
            store.add_media("collection-99", MediaItem::placeholder(1)),
            Err(Rejection::UnknownBlock)
        );
        assert_eq!(
            store.add_tag("collection-1", 500, "x"),
            Err(Rejection::UnknownMedia)
        );
    }

    #[test]
    fn tag_mutations_track_dirtiness_only_on_change() {
        let mut store = store();
        let id = store.blocks()[0].id.clone();

        store.add_tag(&id, 0, "x").unwrap();
        assert!(store.is_dirty(&id));
        assert_eq!(store.block(&id).unwrap().media[0].tags, vec!["x"]);

        store.apply_save_result(&id, true);
        assert!(!store.is_dirty(&id));

        // Duplicate insert changes nothing, so the block stays clean.
        store.add_tag(&id, 0, "x").unwrap();
        assert!(!store.is_dirty(&id));

        store.remove_tag(&id, 0, "x").unwrap();
        assert!(store.is_dirty(&id));
        store.apply_save_result(&id, true);
        store.remove_tag(&id, 0, "x").unwrap();
        assert!(!store.is_dirty(&id));
    }

    #[test]
    fn metadata_upserts_last_write_wins() {
        let mut store = store();
        let id = store.blocks()[0].id.clone();

        store.set_metadata(&id, 0, "year", "2023").unwrap();
        store.set_metadata(&id, 0, "year", "2024").unwrap();

        let item = &store.block(&id).unwrap().media[0];
        assert_eq!(item.metadata.get("year").map(String::as_str), Some("2024"));
        assert_eq!(item.metadata.len(), 1);
    }

    #[test]
    fn set_cover_replaces_and_marks_dirty() {
        let mut store = store();
        let id = store.blocks()[1].id.clone();
        let cover = MediaItem::video("data:video/mp4;base64,".into(), None, "clip".into());

        store.set_cover(&id, cover).unwrap();

        let block = store.block(&id).unwrap();
        assert_eq!(block.cover_media.kind, MediaKind::Video);
        assert!(store.is_dirty(&id));
    }

    #[test]
    fn save_result_clears_exactly_one_dirty_entry() {
        let mut store = store();
        let first = store.blocks()[0].id.clone();
        let second = store.blocks()[1].id.clone();
        store.add_slide(&first).unwrap();
        store.add_slide(&second).unwrap();

        store.apply_save_result(&first, true);
        assert!(!store.is_dirty(&first));
        assert!(store.is_dirty(&second));

        store.apply_save_result(&second, false);
        assert!(store.is_dirty(&second));
    }
}
