//! Festival model

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Artist;

/// A festival as held by the store.
///
/// The lineup keeps artist ids only; the artists themselves are owned by the
/// store and resolved whenever the festival is handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct Festival {
    pub id: i64,
    pub name: String,
    pub place: String,
    pub date: Option<NaiveDate>,
    pub price: Option<Decimal>,
    /// Photo URLs in insertion order, duplicates allowed
    pub photos: Vec<String>,
    /// Artist ids in the order they joined the lineup
    pub lineup: IndexSet<i64>,
}

impl Festival {
    /// Create a festival with an empty lineup from submitted fields
    pub fn from_input(id: i64, input: FestivalInput) -> Self {
        Self {
            id,
            name: input.name,
            place: input.place,
            date: input.date,
            price: input.price,
            photos: input.photos.unwrap_or_default(),
            lineup: IndexSet::new(),
        }
    }

    /// Replace the descriptive fields and photos; the lineup is left as is
    pub fn apply(&mut self, input: FestivalInput) {
        self.name = input.name;
        self.place = input.place;
        self.date = input.date;
        self.price = input.price;
        self.photos = input.photos.unwrap_or_default();
    }

    /// Remove every photo equal to `url`
    pub fn remove_photo(&mut self, url: &str) {
        self.photos.retain(|photo| photo != url);
    }

    /// Resolve the lineup against the artist mapping
    pub fn view(&self, artists: &IndexMap<i64, Artist>) -> FestivalView {
        FestivalView {
            id: self.id,
            name: self.name.clone(),
            place: self.place.clone(),
            date: self.date,
            price: self.price,
            photos: self.photos.clone(),
            lineup: self.resolve_lineup(artists),
        }
    }

    pub fn resolve_lineup(&self, artists: &IndexMap<i64, Artist>) -> Vec<Artist> {
        self.lineup
            .iter()
            .filter_map(|id| artists.get(id).cloned())
            .collect()
    }
}

/// Festival as returned to callers, with the lineup expanded to artists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestivalView {
    pub id: i64,
    pub name: String,
    pub place: String,
    pub date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", default)]
    pub price: Option<Decimal>,
    pub photos: Vec<String>,
    pub lineup: Vec<Artist>,
}

/// Fields a caller submits when creating or updating a festival
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FestivalInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
    /// Only honored on create; members are matched by id
    #[serde(default)]
    pub lineup: Option<Vec<LineupRef>>,
}

#[cfg(test)]
impl FestivalInput {
    pub fn new(name: impl Into<String>, place: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            place: place.into(),
            ..Default::default()
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_photos(mut self, photos: Vec<String>) -> Self {
        self.photos = Some(photos);
        self
    }

    pub fn with_lineup(mut self, ids: &[i64]) -> Self {
        self.lineup = Some(ids.iter().map(|&id| LineupRef { id: Some(id) }).collect());
        self
    }
}

/// Reference to an existing artist inside a submitted lineup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineupRef {
    #[serde(default)]
    pub id: Option<i64>,
}
