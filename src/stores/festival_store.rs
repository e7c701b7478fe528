//! Festival store - in-memory festivals and artists with lineup management

use std::sync::atomic::{AtomicI64, Ordering};

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::models::{Artist, ArtistInput, Festival, FestivalInput, FestivalView};

/// Both mappings, kept in insertion order
#[derive(Debug, Default)]
pub struct Catalog {
    pub festivals: IndexMap<i64, Festival>,
    pub artists: IndexMap<i64, Artist>,
}

/// In-memory store for festivals and artists.
///
/// The store owns every artist; festivals refer to artists by id. A single
/// lock guards both mappings so lineup edits and cascading deletes see a
/// consistent view. Id assignment goes through atomic sequences.
#[derive(Debug)]
pub struct FestivalStore {
    catalog: RwLock<Catalog>,
    festival_seq: AtomicI64,
    artist_seq: AtomicI64,
}

impl FestivalStore {
    /// Create an empty store with both sequences at 1
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Catalog::default()),
            festival_seq: AtomicI64::new(1),
            artist_seq: AtomicI64::new(1),
        }
    }

    pub(crate) fn next_festival_id(&self) -> i64 {
        self.festival_seq.fetch_add(1, Ordering::SeqCst)
    }

    pub(crate) fn next_artist_id(&self) -> i64 {
        self.artist_seq.fetch_add(1, Ordering::SeqCst)
    }

    /// Move a sequence past `max_id` so seeded ids are never handed out again
    pub(crate) fn advance_artist_seq(&self, max_id: i64) {
        self.artist_seq
            .fetch_max(max_id.saturating_add(1), Ordering::SeqCst);
    }

    pub(crate) fn advance_festival_seq(&self, max_id: i64) {
        self.festival_seq
            .fetch_max(max_id.saturating_add(1), Ordering::SeqCst);
    }

    /// Replace both mappings at once
    pub(crate) fn install(&self, catalog: Catalog) {
        *self.catalog.write() = catalog;
    }

    // ========== Festivals ==========

    /// All festivals in insertion order
    pub fn list_festivals(&self) -> Vec<FestivalView> {
        let catalog = self.catalog.read();
        catalog
            .festivals
            .values()
            .map(|f| f.view(&catalog.artists))
            .collect()
    }

    pub fn get_festival(&self, id: i64) -> Option<FestivalView> {
        let catalog = self.catalog.read();
        catalog.festivals.get(&id).map(|f| f.view(&catalog.artists))
    }

    pub fn festival_count(&self) -> usize {
        self.catalog.read().festivals.len()
    }

    /// Store a new festival under a fresh id.
    ///
    /// Lineup entries that do not name a stored artist are dropped.
    pub fn create_festival(&self, mut input: FestivalInput) -> FestivalView {
        let id = self.next_festival_id();
        let members = input.lineup.take().unwrap_or_default();
        let mut festival = Festival::from_input(id, input);

        let mut catalog = self.catalog.write();
        for member in members.into_iter().filter_map(|m| m.id) {
            if catalog.artists.contains_key(&member) {
                festival.lineup.insert(member);
            }
        }

        let view = festival.view(&catalog.artists);
        catalog.festivals.insert(id, festival);
        debug!("Created festival {} ({})", id, view.name);
        view
    }

    /// Replace a festival's fields, keeping its lineup
    pub fn update_festival(&self, id: i64, input: FestivalInput) -> Option<FestivalView> {
        self.edit_festival(id, |festival| festival.apply(input))
    }

    /// Remove a festival; unknown ids are ignored
    pub fn delete_festival(&self, id: i64) {
        if self.catalog.write().festivals.shift_remove(&id).is_some() {
            debug!("Deleted festival {}", id);
        }
    }

    /// Artists performing at a festival, in lineup order
    pub fn lineup(&self, festival_id: i64) -> Option<Vec<Artist>> {
        let catalog = self.catalog.read();
        catalog
            .festivals
            .get(&festival_id)
            .map(|f| f.resolve_lineup(&catalog.artists))
    }

    /// Append a photo URL, duplicates included
    pub fn add_photo(&self, festival_id: i64, url: &str) -> Option<FestivalView> {
        self.edit_festival(festival_id, |festival| festival.photos.push(url.to_string()))
    }

    /// Remove every occurrence of a photo URL
    pub fn remove_photo(&self, festival_id: i64, url: &str) -> Option<FestivalView> {
        self.edit_festival(festival_id, |festival| festival.remove_photo(url))
    }

    /// Add an artist to a festival's lineup. Both ids must resolve.
    pub fn add_artist_to_festival(&self, festival_id: i64, artist_id: i64) -> Option<FestivalView> {
        let mut catalog = self.catalog.write();
        if !catalog.artists.contains_key(&artist_id) {
            return None;
        }
        let Catalog { festivals, artists } = &mut *catalog;
        let festival = festivals.get_mut(&festival_id)?;
        if festival.lineup.insert(artist_id) {
            debug!("Added artist {} to festival {}", artist_id, festival_id);
        }
        Some(festival.view(artists))
    }

    /// Remove an artist from a festival's lineup.
    ///
    /// Only the festival id has to resolve; removing a non-member is a no-op.
    pub fn remove_artist_from_festival(
        &self,
        festival_id: i64,
        artist_id: i64,
    ) -> Option<FestivalView> {
        self.edit_festival(festival_id, |festival| {
            festival.lineup.shift_remove(&artist_id);
        })
    }

    fn edit_festival(&self, id: i64, edit: impl FnOnce(&mut Festival)) -> Option<FestivalView> {
        let mut catalog = self.catalog.write();
        let Catalog { festivals, artists } = &mut *catalog;
        let festival = festivals.get_mut(&id)?;
        edit(festival);
        Some(festival.view(artists))
    }

    // ========== Artists ==========

    /// All artists in insertion order
    pub fn list_artists(&self) -> Vec<Artist> {
        self.catalog.read().artists.values().cloned().collect()
    }

    pub fn get_artist(&self, id: i64) -> Option<Artist> {
        self.catalog.read().artists.get(&id).cloned()
    }

    pub fn artist_count(&self) -> usize {
        self.catalog.read().artists.len()
    }

    /// Store a new artist under a fresh id
    pub fn create_artist(&self, input: ArtistInput) -> Artist {
        let artist = Artist::from_input(self.next_artist_id(), input);
        self.catalog.write().artists.insert(artist.id, artist.clone());
        debug!("Created artist {} ({})", artist.id, artist.name);
        artist
    }

    /// Replace an artist's name, genre and photo URL
    pub fn update_artist(&self, id: i64, input: ArtistInput) -> Option<Artist> {
        let mut catalog = self.catalog.write();
        let artist = catalog.artists.get_mut(&id)?;
        artist.apply(input);
        Some(artist.clone())
    }

    /// Remove an artist, purging it from every lineup first
    pub fn delete_artist(&self, id: i64) {
        let mut catalog = self.catalog.write();
        for festival in catalog.festivals.values_mut() {
            festival.lineup.shift_remove(&id);
        }
        if catalog.artists.shift_remove(&id).is_some() {
            debug!("Deleted artist {}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn rockfest() -> FestivalInput {
        FestivalInput::new("Rockfest", "Park")
            .with_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .with_price(Decimal::new(4250, 2))
    }

    #[test]
    fn test_create_festival_normalizes_missing_collections() {
        let store = FestivalStore::new();
        let created = store.create_festival(FestivalInput::new("X", "Y"));

        let fetched = store.get_festival(created.id).unwrap();
        assert!(fetched.photos.is_empty());
        assert!(fetched.lineup.is_empty());
        assert_eq!(fetched.name, "X");
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let store = FestivalStore::new();
        let a = store.create_festival(rockfest());
        let b = store.create_festival(rockfest());
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        let artist = store.create_artist(ArtistInput::new("Band A"));
        assert_eq!(artist.id, 1);
    }

    #[test]
    fn test_create_festival_keeps_only_known_lineup_members() {
        let store = FestivalStore::new();
        let band = store.create_artist(ArtistInput::new("Band A"));

        let created = store.create_festival(rockfest().with_lineup(&[band.id, 42, band.id]));
        assert_eq!(created.lineup, vec![band]);
    }

    #[test]
    fn test_update_festival_keeps_lineup() {
        let store = FestivalStore::new();
        let band = store.create_artist(ArtistInput::new("Band A"));
        let festival = store.create_festival(rockfest().with_photos(vec!["a".into()]));
        store.add_artist_to_festival(festival.id, band.id).unwrap();

        let updated = store
            .update_festival(festival.id, FestivalInput::new("Rockfest 2", "Beach"))
            .unwrap();

        assert_eq!(updated.name, "Rockfest 2");
        assert_eq!(updated.place, "Beach");
        assert_eq!(updated.price, None);
        assert!(updated.photos.is_empty());
        assert_eq!(updated.lineup.len(), 1);
    }

    #[test]
    fn test_missing_ids_are_absent_not_errors() {
        let store = FestivalStore::new();
        assert!(store.get_festival(9).is_none());
        assert!(store.get_artist(9).is_none());
        assert!(store.update_festival(9, rockfest()).is_none());
        assert!(store.update_artist(9, ArtistInput::new("A")).is_none());
        assert!(store.add_photo(9, "a").is_none());
        assert!(store.remove_photo(9, "a").is_none());
        assert!(store.lineup(9).is_none());

        store.delete_festival(9);
        store.delete_artist(9);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let store = FestivalStore::new();
        let first = store.create_festival(FestivalInput::new("B", "P"));
        let second = store.create_festival(FestivalInput::new("A", "P"));
        let third = store.create_festival(FestivalInput::new("C", "P"));
        store.delete_festival(second.id);

        let ids: Vec<i64> = store.list_festivals().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }

    #[test]
    fn test_photos_keep_duplicates_and_remove_all() {
        let store = FestivalStore::new();
        let festival = store.create_festival(rockfest());

        store.add_photo(festival.id, "a.jpg");
        store.add_photo(festival.id, "b.jpg");
        let with_dup = store.add_photo(festival.id, "a.jpg").unwrap();
        assert_eq!(with_dup.photos, vec!["a.jpg", "b.jpg", "a.jpg"]);

        let removed = store.remove_photo(festival.id, "a.jpg").unwrap();
        assert_eq!(removed.photos, vec!["b.jpg"]);
    }

    #[test]
    fn test_add_artist_is_idempotent() {
        let store = FestivalStore::new();
        let band = store.create_artist(ArtistInput::new("Band A"));
        let festival = store.create_festival(rockfest());

        store.add_artist_to_festival(festival.id, band.id).unwrap();
        let again = store.add_artist_to_festival(festival.id, band.id).unwrap();

        assert_eq!(again.lineup, vec![band]);
    }

    #[test]
    fn test_add_artist_requires_both_ids() {
        let store = FestivalStore::new();
        let band = store.create_artist(ArtistInput::new("Band A"));
        let festival = store.create_festival(rockfest());

        assert!(store.add_artist_to_festival(festival.id, 99).is_none());
        assert!(store.add_artist_to_festival(99, band.id).is_none());
        assert!(store.lineup(festival.id).unwrap().is_empty());
    }

    #[test]
    fn test_remove_artist_is_lenient() {
        let store = FestivalStore::new();
        let band = store.create_artist(ArtistInput::new("Band A"));
        let other = store.create_artist(ArtistInput::new("Band B"));
        let festival = store.create_festival(rockfest());
        store.add_artist_to_festival(festival.id, band.id).unwrap();

        // unknown artist and non-member both succeed
        assert!(store.remove_artist_from_festival(festival.id, 999).is_some());
        let unchanged = store.remove_artist_from_festival(festival.id, other.id).unwrap();
        assert_eq!(unchanged.lineup.len(), 1);

        let removed = store.remove_artist_from_festival(festival.id, band.id).unwrap();
        assert!(removed.lineup.is_empty());

        assert!(store.remove_artist_from_festival(999, band.id).is_none());
    }

    #[test]
    fn test_lineup_preserves_insertion_order() {
        let store = FestivalStore::new();
        let c = store.create_artist(ArtistInput::new("C"));
        let a = store.create_artist(ArtistInput::new("A"));
        let b = store.create_artist(ArtistInput::new("B"));
        let festival = store.create_festival(rockfest());
        for id in [b.id, c.id, a.id] {
            store.add_artist_to_festival(festival.id, id);
        }

        let names: Vec<String> = store
            .lineup(festival.id)
            .unwrap()
            .into_iter()
            .map(|artist| artist.name)
            .collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_artist_update_is_seen_by_every_festival() {
        let store = FestivalStore::new();
        let band = store.create_artist(ArtistInput::new("Band A"));
        let one = store.create_festival(rockfest());
        let two = store.create_festival(rockfest());
        store.add_artist_to_festival(one.id, band.id);
        store.add_artist_to_festival(two.id, band.id);

        store
            .update_artist(band.id, ArtistInput::new("Band A+").with_genre("rock"))
            .unwrap();

        for id in [one.id, two.id] {
            let lineup = store.lineup(id).unwrap();
            assert_eq!(lineup[0].name, "Band A+");
            assert_eq!(lineup[0].genre.as_deref(), Some("rock"));
        }
    }

    #[test]
    fn test_returned_artist_is_a_copy() {
        let store = FestivalStore::new();
        let mut band = store.create_artist(ArtistInput::new("Band A"));
        band.name = "changed".into();
        assert_eq!(store.get_artist(band.id).unwrap().name, "Band A");
    }

    #[test]
    fn test_delete_artist_cascades_to_every_lineup() {
        let store = FestivalStore::new();
        let band = store.create_artist(ArtistInput::new("Band A"));
        let keep = store.create_artist(ArtistInput::new("Band B"));
        let one = store.create_festival(rockfest());
        let two = store.create_festival(rockfest());
        for festival in [one.id, two.id] {
            store.add_artist_to_festival(festival, band.id);
            store.add_artist_to_festival(festival, keep.id);
        }

        store.delete_artist(band.id);

        for festival in store.list_festivals() {
            assert_eq!(festival.lineup, vec![keep.clone()]);
        }
        assert_eq!(store.list_artists(), vec![keep]);
        assert!(store.get_artist(band.id).is_none());
    }

    #[test]
    fn test_advance_saturates_at_integer_limit() {
        let store = FestivalStore::new();
        store.advance_artist_seq(i64::MAX);
        store.advance_festival_seq(i64::MAX);
        assert_eq!(store.artist_seq.load(Ordering::SeqCst), i64::MAX);
        assert_eq!(store.festival_seq.load(Ordering::SeqCst), i64::MAX);

        // a smaller id never moves a sequence back
        store.advance_artist_seq(5);
        assert_eq!(store.artist_seq.load(Ordering::SeqCst), i64::MAX);
    }

    #[test]
    fn test_deleted_artist_id_is_not_reused() {
        let store = FestivalStore::new();
        let band = store.create_artist(ArtistInput::new("Band A"));
        store.delete_artist(band.id);
        let next = store.create_artist(ArtistInput::new("Band B"));
        assert!(next.id > band.id);
    }
}
