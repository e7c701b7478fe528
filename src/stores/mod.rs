//! In-memory store for festivals and artists, plus its snapshot loader

mod festival_store;
mod loader;

pub use festival_store::FestivalStore;

#[cfg(test)]
pub use loader::SeedDocument;
