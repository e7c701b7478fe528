//! Data models for the festival catalog
//!
//! Entities held by the store plus the field bundles callers submit.

mod artist;
mod festival;

pub use artist::{Artist, ArtistInput};
pub use festival::{Festival, FestivalInput, FestivalView};
