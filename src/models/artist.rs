//! Artist model

use serde::{Deserialize, Serialize};

/// An artist that can appear in festival lineups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Store-assigned id
    pub id: i64,
    /// Artist name
    pub name: String,
    /// Link to a press photo
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Genre label
    #[serde(default)]
    pub genre: Option<String>,
}

impl Artist {
    /// Create a new artist
    pub fn new(id: i64, name: String, photo_url: Option<String>, genre: Option<String>) -> Self {
        Self {
            id,
            name,
            photo_url,
            genre,
        }
    }

    /// Build an artist from a submitted field bundle
    pub fn from_input(id: i64, input: ArtistInput) -> Self {
        Self::new(id, input.name, input.photo_url, input.genre)
    }

    /// Overwrite the mutable fields with the ones from `input`
    pub fn apply(&mut self, input: ArtistInput) {
        self.name = input.name;
        self.genre = input.genre;
        self.photo_url = input.photo_url;
    }

    /// Photo URL to redirect to, if one is set and non-blank
    pub fn photo_redirect(&self) -> Option<&str> {
        self.photo_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

/// Fields a caller submits when creating or updating an artist.
///
/// Any `id` in the payload is ignored; ids are always assigned by the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

#[cfg(test)]
impl ArtistInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}
