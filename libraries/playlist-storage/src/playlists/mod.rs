use crate::error::{Result, StorageError};
use chrono::{DateTime, SubsecRound, Utc};
use playlist_core::types::*;
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};

const SELECT_WITH_SONGS: &str = r#"
    SELECT
        p.id, p.version, p.name, p.description, p.created_at, p.updated_at,
        s.id AS song_id, s.titulo, s.artista, s.album, s.anno, s.genero
    FROM playlists p
    LEFT JOIN songs s ON s.playlist_id = p.id
"#;

/// Lookup key for case-insensitive name matching
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Check whether a playlist name is taken, ignoring case
pub async fn exists_by_name(pool: &SqlitePool, name: &str) -> Result<bool> {
    let found: i64 =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM playlists WHERE name_key = ?)")
            .bind(name_key(name))
            .fetch_one(pool)
            .await?;

    Ok(found != 0)
}

/// Get playlist by name (ignoring case) with its songs, in a single query
pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Playlist>> {
    let sql = format!("{SELECT_WITH_SONGS} WHERE p.name_key = ? ORDER BY s.position");
    let rows = sqlx::query(&sql)
        .bind(name_key(name))
        .fetch_all(pool)
        .await?;

    Ok(collect_playlists(&rows)?.into_iter().next())
}

/// Get all playlists in creation order, songs included
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let sql = format!("{SELECT_WITH_SONGS} ORDER BY p.id, s.position");
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    collect_playlists(&rows)
}

/// Insert a new playlist and its songs
pub async fn insert(pool: &SqlitePool, mut playlist: Playlist) -> Result<Playlist> {
    // Stored with millisecond precision
    playlist.created_at = playlist.created_at.trunc_subsecs(3);
    playlist.updated_at = playlist.updated_at.trunc_subsecs(3);

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO playlists (version, name, name_key, description, created_at, updated_at)
        VALUES (0, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&playlist.name)
    .bind(name_key(&playlist.name))
    .bind(&playlist.description)
    .bind(playlist.created_at.timestamp_millis())
    .bind(playlist.updated_at.timestamp_millis())
    .execute(&mut *tx)
    .await
    .map_err(|e| StorageError::from_write(e, &playlist.name))?;

    let id = result.last_insert_rowid();
    let songs = insert_songs(&mut tx, id, playlist.songs()).await?;

    tx.commit().await?;

    playlist.id = Some(id);
    playlist.version = 0;
    playlist.set_songs(songs);

    tracing::debug!(id, name = %playlist.name, "Inserted playlist");
    Ok(playlist)
}

/// Update an existing playlist, replacing its songs
///
/// The row is only written when its stored version still equals
/// `playlist.version`; the version is then incremented.
pub async fn update(pool: &SqlitePool, mut playlist: Playlist) -> Result<Playlist> {
    let Some(id) = playlist.id else {
        return Err(StorageError::NotFound(playlist.name));
    };

    playlist.touch();
    playlist.updated_at = playlist.updated_at.trunc_subsecs(3);

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE playlists
        SET name = ?, name_key = ?, description = ?, updated_at = ?, version = version + 1
        WHERE id = ? AND version = ?
        "#,
    )
    .bind(&playlist.name)
    .bind(name_key(&playlist.name))
    .bind(&playlist.description)
    .bind(playlist.updated_at.timestamp_millis())
    .bind(id)
    .bind(playlist.version)
    .execute(&mut *tx)
    .await
    .map_err(|e| StorageError::from_write(e, &playlist.name))?;

    if result.rows_affected() == 0 {
        return Err(StorageError::StaleVersion {
            name: playlist.name,
            expected: playlist.version,
        });
    }

    sqlx::query("DELETE FROM songs WHERE playlist_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let songs = insert_songs(&mut tx, id, playlist.songs()).await?;

    tx.commit().await?;

    playlist.version += 1;
    playlist.set_songs(songs);

    tracing::debug!(id, version = playlist.version, "Updated playlist");
    Ok(playlist)
}

/// Delete playlist (songs go with it through the cascading foreign key)
pub async fn delete(pool: &SqlitePool, id: PlaylistId, name: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound(name.to_string()));
    }

    Ok(())
}

// Helper functions

async fn insert_songs(
    tx: &mut Transaction<'_, Sqlite>,
    playlist_id: PlaylistId,
    songs: &[Song],
) -> Result<Vec<Song>> {
    let mut saved = Vec::with_capacity(songs.len());

    for (position, song) in songs.iter().enumerate() {
        let result = sqlx::query(
            r#"
            INSERT INTO songs (playlist_id, position, titulo, artista, album, anno, genero)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(playlist_id)
        .bind(position as i64)
        .bind(&song.titulo)
        .bind(&song.artista)
        .bind(&song.album)
        .bind(&song.anno)
        .bind(&song.genero)
        .execute(&mut **tx)
        .await?;

        let mut song = song.clone();
        song.id = Some(result.last_insert_rowid());
        saved.push(song);
    }

    Ok(saved)
}

/// Fold joined playlist/song rows into playlists
///
/// Rows must be ordered by playlist so that each playlist's rows are adjacent.
fn collect_playlists(rows: &[SqliteRow]) -> Result<Vec<Playlist>> {
    let mut playlists: Vec<Playlist> = Vec::new();

    for row in rows {
        let id: PlaylistId = row.try_get("id")?;

        if playlists.last().and_then(|p| p.id) != Some(id) {
            let mut playlist = Playlist::new(
                row.try_get::<String, _>("name")?,
                row.try_get::<Option<String>, _>("description")?,
            );
            playlist.id = Some(id);
            playlist.version = row.try_get("version")?;
            playlist.created_at = timestamp(row.try_get("created_at")?)?;
            playlist.updated_at = timestamp(row.try_get("updated_at")?)?;
            playlists.push(playlist);
        }

        let Some(song_id) = row.try_get::<Option<i64>, _>("song_id")? else {
            continue;
        };

        let mut song = Song::new(
            row.try_get::<String, _>("titulo")?,
            row.try_get::<String, _>("artista")?,
            row.try_get("album")?,
            row.try_get("anno")?,
            row.try_get("genero")?,
        );
        song.id = Some(song_id);

        if let Some(playlist) = playlists.last_mut() {
            playlist.add_song(song);
        }
    }

    Ok(playlists)
}

fn timestamp(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or(StorageError::InvalidTimestamp(millis))
}
