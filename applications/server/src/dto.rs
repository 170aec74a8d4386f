//! Wire-level request/response shapes
//!
//! Field names follow the public JSON contract (`nombre`, `canciones`, ...).
//! Required text fields default to an empty string when absent so that a
//! missing value is reported as a validation failure on that field rather
//! than as an unreadable payload.

use playlist_core::{
    types::{
        ALBUM_MAX_LEN, ANNO_MAX_LEN, ARTISTA_MAX_LEN, DESCRIPTION_MAX_LEN, GENERO_MAX_LEN,
        NAME_MAX_LEN, TITULO_MAX_LEN,
    },
    PlaylistError,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

/// Playlist as sent and received by clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlaylistDto {
    /// Unique name, compared ignoring case
    #[serde(default)]
    #[schema(example = "Lista 1")]
    pub nombre: String,

    #[schema(example = "Lista de canciones de Spotify")]
    #[serde(default)]
    pub descripcion: Option<String>,

    /// Songs, compared by value; duplicates collapse
    #[serde(default)]
    #[schema(value_type = Option<Vec<SongDto>>)]
    pub canciones: Option<BTreeSet<SongDto>>,
}

/// Song as sent and received by clients
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub struct SongDto {
    #[serde(default)]
    #[schema(example = "Viva la Vida")]
    pub titulo: String,

    #[serde(default)]
    #[schema(example = "Coldplay")]
    pub artista: String,

    #[serde(default)]
    #[schema(example = "Viva la Vida or Death and All His Friends")]
    pub album: Option<String>,

    /// Release year, at most four characters
    #[serde(default)]
    #[schema(example = "2008")]
    pub anno: Option<String>,

    #[serde(default)]
    #[schema(example = "Rock")]
    pub genero: Option<String>,
}

impl PlaylistDto {
    /// Check every constraint a new playlist must satisfy
    ///
    /// Fails with the first offending field.
    pub fn validate_for_create(&self) -> Result<(), PlaylistError> {
        required("nombre", &self.nombre, NAME_MAX_LEN)?;
        self.validate_details()
    }

    /// Check the optional parts (description and songs)
    ///
    /// Songs form an unordered set, so their fields are reported as
    /// `canciones[].<field>` without a position.
    pub fn validate_details(&self) -> Result<(), PlaylistError> {
        optional("descripcion", self.descripcion.as_deref(), DESCRIPTION_MAX_LEN)?;

        for song in self.canciones.iter().flatten() {
            song.validate("canciones[]")?;
        }

        Ok(())
    }
}

impl SongDto {
    pub fn validate(&self, path: &str) -> Result<(), PlaylistError> {
        required(&format!("{path}.titulo"), &self.titulo, TITULO_MAX_LEN)?;
        required(&format!("{path}.artista"), &self.artista, ARTISTA_MAX_LEN)?;
        optional(&format!("{path}.album"), self.album.as_deref(), ALBUM_MAX_LEN)?;
        optional(&format!("{path}.anno"), self.anno.as_deref(), ANNO_MAX_LEN)?;
        optional(&format!("{path}.genero"), self.genero.as_deref(), GENERO_MAX_LEN)?;
        Ok(())
    }
}

fn required(field: &str, value: &str, max: usize) -> Result<(), PlaylistError> {
    if value.trim().is_empty() {
        return Err(PlaylistError::validation(field, "must not be blank"));
    }
    optional(field, Some(value), max)
}

fn optional(field: &str, value: Option<&str>, max: usize) -> Result<(), PlaylistError> {
    match value {
        Some(v) if v.chars().count() > max => Err(PlaylistError::validation(
            field,
            format!("size must be at most {max} characters"),
        )),
        _ => Ok(()),
    }
}
