//! Translation between stored playlists and transfer objects
//!
//! Pure functions without failure modes; validation happens before mapping.

use crate::dto::{PlaylistDto, SongDto};
use playlist_core::types::{Playlist, Song};

/// Flatten a playlist and its songs into the wire shape
pub fn to_dto(entity: &Playlist) -> PlaylistDto {
    let canciones = entity
        .songs()
        .iter()
        .map(|s| SongDto {
            titulo: s.titulo.clone(),
            artista: s.artista.clone(),
            album: s.album.clone(),
            anno: s.anno.clone(),
            genero: s.genero.clone(),
        })
        .collect();

    PlaylistDto {
        nombre: entity.name.clone(),
        descripcion: entity.description.clone(),
        canciones: Some(canciones),
    }
}

/// Build a new, unsaved playlist with a fresh song per transfer song
pub fn to_entity(dto: &PlaylistDto) -> Playlist {
    let mut playlist = Playlist::new(dto.nombre.clone(), dto.descripcion.clone());
    for song in dto.canciones.iter().flatten() {
        playlist.add_song(to_song(song));
    }
    playlist
}

/// Apply the fields present in `dto` to `target`
///
/// A present description overwrites the stored one; a present song set
/// replaces the whole collection. The name is never changed.
pub fn update_entity(target: &mut Playlist, dto: &PlaylistDto) {
    if let Some(description) = &dto.descripcion {
        target.description = Some(description.clone());
    }
    if let Some(songs) = &dto.canciones {
        target.set_songs(songs.iter().map(to_song));
    }
}

fn to_song(dto: &SongDto) -> Song {
    Song::new(
        dto.titulo.clone(),
        dto.artista.clone(),
        dto.album.clone(),
        dto.anno.clone(),
        dto.genero.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn song(titulo: &str) -> SongDto {
        SongDto {
            titulo: titulo.to_string(),
            artista: "Artist".to_string(),
            album: Some("Album".to_string()),
            anno: Some("2024".to_string()),
            genero: None,
        }
    }

    fn dto() -> PlaylistDto {
        PlaylistDto {
            nombre: "Lista 1".to_string(),
            descripcion: Some("D".to_string()),
            canciones: Some(BTreeSet::from([song("B"), song("A")])),
        }
    }

    #[test]
    fn test_round_trip_preserves_dto() {
        let original = dto();
        assert_eq!(to_dto(&to_entity(&original)), original);
    }

    #[test]
    fn test_to_entity_without_songs() {
        let entity = to_entity(&PlaylistDto {
            nombre: "Empty".to_string(),
            descripcion: None,
            canciones: None,
        });

        assert!(entity.is_new());
        assert!(entity.songs().is_empty());
        assert_eq!(to_dto(&entity).canciones, Some(BTreeSet::new()));
    }

    #[test]
    fn test_update_entity_leaves_absent_fields_alone() {
        let mut entity = to_entity(&dto());

        update_entity(
            &mut entity,
            &PlaylistDto {
                nombre: "Ignored".to_string(),
                descripcion: None,
                canciones: None,
            },
        );

        assert_eq!(entity.name, "Lista 1");
        assert_eq!(entity.description.as_deref(), Some("D"));
        assert_eq!(entity.songs().len(), 2);
    }

    #[test]
    fn test_update_entity_replaces_present_fields() {
        let mut entity = to_entity(&dto());

        update_entity(
            &mut entity,
            &PlaylistDto {
                nombre: String::new(),
                descripcion: Some("New".to_string()),
                canciones: Some(BTreeSet::from([song("C")])),
            },
        );

        assert_eq!(entity.description.as_deref(), Some("New"));
        assert_eq!(entity.songs().len(), 1);
        assert_eq!(entity.songs()[0].titulo, "C");
    }
}
