/// Playlist service - business rules on top of the persistence gateway
use crate::{
    dto::PlaylistDto,
    error::Result,
    mapper,
};
use playlist_core::{PlaylistError, PlaylistRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct PlaylistService {
    repository: Arc<dyn PlaylistRepository>,
}

impl PlaylistService {
    pub fn new(repository: Arc<dyn PlaylistRepository>) -> Self {
        Self { repository }
    }

    /// Create a playlist from a transfer object
    ///
    /// The existence check is only a fast path: a concurrent writer can slip
    /// past it, in which case the storage unique constraint rejects the insert
    /// and the same `AlreadyExists` error is returned.
    pub async fn create(&self, dto: PlaylistDto) -> Result<PlaylistDto> {
        dto.validate_for_create()?;

        if self
            .repository
            .exists_by_name_ignore_case(&dto.nombre)
            .await?
        {
            return Err(PlaylistError::already_exists(&dto.nombre).into());
        }

        let saved = self.repository.save(mapper::to_entity(&dto)).await?;
        tracing::info!(name = %saved.name, songs = saved.songs().len(), "Created playlist");

        Ok(mapper::to_dto(&saved))
    }

    /// All playlists in creation order
    pub async fn find_all(&self) -> Result<Vec<PlaylistDto>> {
        let playlists = self.repository.find_all().await?;
        Ok(playlists.iter().map(mapper::to_dto).collect())
    }

    /// Find a playlist by name, ignoring case
    pub async fn find_by_name(&self, name: &str) -> Result<PlaylistDto> {
        let playlist = self
            .repository
            .find_by_name_ignore_case(name)
            .await?
            .ok_or_else(|| PlaylistError::not_found(name))?;

        Ok(mapper::to_dto(&playlist))
    }

    /// Apply the description and/or songs of `dto` to an existing playlist
    ///
    /// `dto.nombre` is ignored; the playlist keeps its name. Fails with
    /// `ConcurrencyConflict` if another writer saved the playlist in between.
    pub async fn update(&self, name: &str, dto: PlaylistDto) -> Result<PlaylistDto> {
        dto.validate_details()?;

        let mut playlist = self
            .repository
            .find_by_name_ignore_case(name)
            .await?
            .ok_or_else(|| PlaylistError::not_found(name))?;

        mapper::update_entity(&mut playlist, &dto);

        let saved = self.repository.save(playlist).await?;
        tracing::info!(name = %saved.name, version = saved.version, "Updated playlist");

        Ok(mapper::to_dto(&saved))
    }

    /// Delete a playlist and its songs
    pub async fn delete_by_name(&self, name: &str) -> Result<()> {
        let playlist = self
            .repository
            .find_by_name_ignore_case(name)
            .await?
            .ok_or_else(|| PlaylistError::not_found(name))?;

        self.repository.delete(&playlist).await?;
        tracing::info!(name = %playlist.name, "Deleted playlist");

        Ok(())
    }
}
