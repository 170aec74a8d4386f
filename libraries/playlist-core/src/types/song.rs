/// Song domain type
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Storage-assigned song identifier
pub type SongId = i64;

/// Maximum length of a song title
pub const TITULO_MAX_LEN: usize = 200;
/// Maximum length of an artist name
pub const ARTISTA_MAX_LEN: usize = 150;
/// Maximum length of an album name
pub const ALBUM_MAX_LEN: usize = 150;
/// Maximum length of the release year
pub const ANNO_MAX_LEN: usize = 4;
/// Maximum length of a genre
pub const GENERO_MAX_LEN: usize = 50;

/// A track record owned by exactly one playlist
///
/// The owning playlist is not referenced from here: a `Playlist` holds its
/// songs, and the foreign key only exists in storage. Equality and hashing
/// ignore `id`, so two songs with the same metadata are the same song.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Storage identifier, `None` until persisted
    pub id: Option<SongId>,

    /// Title
    pub titulo: String,

    /// Performing artist
    pub artista: String,

    /// Album name
    pub album: Option<String>,

    /// Release year as text
    pub anno: Option<String>,

    /// Genre
    pub genero: Option<String>,
}

impl Song {
    /// Create a new, unsaved song
    pub fn new(
        titulo: impl Into<String>,
        artista: impl Into<String>,
        album: Option<String>,
        anno: Option<String>,
        genero: Option<String>,
    ) -> Self {
        Self {
            id: None,
            titulo: titulo.into(),
            artista: artista.into(),
            album,
            anno,
            genero,
        }
    }

    fn value_fields(&self) -> (&str, &str, Option<&str>, Option<&str>, Option<&str>) {
        (
            &self.titulo,
            &self.artista,
            self.album.as_deref(),
            self.anno.as_deref(),
            self.genero.as_deref(),
        )
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.value_fields() == other.value_fields()
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value_fields().hash(state);
    }
}
