/// Playlist service tests
/// Business rules exercised against a real database, without HTTP
mod common;

use common::TestDb;
use playlist_core::{PlaylistError, PlaylistRepository};
use playlist_server::{
    dto::{PlaylistDto, SongDto},
    PlaylistService, ServerError,
};

fn song(titulo: &str, artista: &str) -> SongDto {
    SongDto {
        titulo: titulo.to_string(),
        artista: artista.to_string(),
        ..SongDto::default()
    }
}

fn playlist(nombre: &str, songs: &[SongDto]) -> PlaylistDto {
    PlaylistDto {
        nombre: nombre.to_string(),
        descripcion: Some("Descripción".to_string()),
        canciones: Some(songs.iter().cloned().collect()),
    }
}

#[tokio::test]
async fn test_create_and_find() {
    let db = TestDb::new().await;
    let service = PlaylistService::new(db.repository());

    let created = service
        .create(playlist("Lista 1", &[song("Imagine", "John Lennon")]))
        .await
        .unwrap();

    let found = service.find_by_name("LISTA 1").await.unwrap();
    assert_eq!(found, created);
    assert_eq!(found.canciones.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_rejects_duplicate_ignoring_case() {
    let db = TestDb::new().await;
    let service = PlaylistService::new(db.repository());

    service.create(playlist("Rock", &[])).await.unwrap();
    let err = service.create(playlist("rOcK", &[])).await.unwrap_err();

    assert!(matches!(
        err,
        ServerError::Playlist(PlaylistError::AlreadyExists(_))
    ));
    assert_eq!(service.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_validates_before_storing() {
    let db = TestDb::new().await;
    let service = PlaylistService::new(db.repository());

    let err = service
        .create(playlist("Lista", &[song("", "Queen")]))
        .await
        .unwrap_err();

    match err {
        ServerError::Playlist(PlaylistError::Validation { field, .. }) => {
            assert_eq!(field, "canciones[].titulo");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(service.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_songs_are_stored_once() {
    let db = TestDb::new().await;
    let service = PlaylistService::new(db.repository());

    let created = service
        .create(playlist(
            "Repetidas",
            &[song("Imagine", "John Lennon"), song("Imagine", "John Lennon")],
        ))
        .await
        .unwrap();

    assert_eq!(created.canciones.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_all_in_creation_order() {
    let db = TestDb::new().await;
    let service = PlaylistService::new(db.repository());

    for name in ["Zeta", "Alfa", "Media"] {
        service.create(playlist(name, &[])).await.unwrap();
    }

    let names: Vec<_> = service
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.nombre)
        .collect();

    assert_eq!(names, vec!["Zeta", "Alfa", "Media"]);
}

#[tokio::test]
async fn test_update_keeps_unspecified_fields() {
    let db = TestDb::new().await;
    let service = PlaylistService::new(db.repository());

    service
        .create(playlist("Lista", &[song("Imagine", "John Lennon")]))
        .await
        .unwrap();

    let updated = service
        .update(
            "lista",
            PlaylistDto {
                descripcion: Some("Nueva".to_string()),
                ..PlaylistDto::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.nombre, "Lista");
    assert_eq!(updated.descripcion.as_deref(), Some("Nueva"));
    assert_eq!(updated.canciones.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_bumps_version() {
    let db = TestDb::new().await;
    let service = PlaylistService::new(db.repository());

    service.create(playlist("Lista", &[])).await.unwrap();
    service
        .update("Lista", playlist("Lista", &[song("Yesterday", "The Beatles")]))
        .await
        .unwrap();

    let stored = db
        .repository
        .find_by_name_ignore_case("Lista")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(stored.version, 1);
    assert_eq!(stored.songs().len(), 1);
}

#[tokio::test]
async fn test_stale_copy_conflicts() {
    let db = TestDb::new().await;
    let service = PlaylistService::new(db.repository());

    service.create(playlist("Lista", &[])).await.unwrap();

    // Another writer loaded the same version and saves first
    let stale = db
        .repository
        .find_by_name_ignore_case("Lista")
        .await
        .unwrap()
        .unwrap();

    service
        .update("Lista", playlist("Lista", &[song("Yesterday", "The Beatles")]))
        .await
        .unwrap();

    let err = db.repository.save(stale).await.unwrap_err();
    assert!(matches!(err, PlaylistError::ConcurrencyConflict { .. }));
}

#[tokio::test]
async fn test_delete_by_name() {
    let db = TestDb::new().await;
    let service = PlaylistService::new(db.repository());

    service.create(playlist("Lista", &[])).await.unwrap();
    service.delete_by_name("LISTA").await.unwrap();

    let err = service.find_by_name("Lista").await.unwrap_err();
    assert!(matches!(err, ServerError::Playlist(PlaylistError::NotFound(_))));

    let err = service.delete_by_name("Lista").await.unwrap_err();
    assert!(matches!(err, ServerError::Playlist(PlaylistError::NotFound(_))));
}
