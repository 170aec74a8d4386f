mod playlist;
mod song;

pub use playlist::{Playlist, PlaylistId, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
pub use song::{
    Song, SongId, ALBUM_MAX_LEN, ANNO_MAX_LEN, ARTISTA_MAX_LEN, GENERO_MAX_LEN, TITULO_MAX_LEN,
};
