use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::models::{ExportEvent, SimilarSong, Song};

pub const EXPORT_FILENAME: &str = "spotify-data-export.csv";

/// Maximum lyric length in the export; the excerpt always ends in `...`,
/// even when the lyric is already shorter.
const LYRIC_EXCERPT_CHARS: usize = 100;

/// Column names of the export, in emit order.
pub const EXPORT_HEADER: [&str; 31] = [
    "Artist(s)",
    "Song",
    "Album",
    "Genre",
    "Length",
    "Emotion",
    "Popularity",
    "Release Date",
    "Key",
    "Tempo",
    "Energy (%)",
    "Danceability (%)",
    "Positiveness (%)",
    "Liveness (%)",
    "Acousticness (%)",
    "Speechiness (%)",
    "Loudness (dB)",
    "Time Signature",
    "Explicit",
    "Instrumentalness (%)",
    "Lyrics",
    "Good for Party",
    "Good for Work/Study",
    "Good for Relaxation/Meditation",
    "Good for Exercise",
    "Good for Running",
    "Good for Yoga/Stretching",
    "Good for Driving",
    "Good for Social Gatherings",
    "Good for Morning Routine",
    "Similar Songs",
];

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render one similar-song entry as `name - artist (score%)`. The entry's
/// key names vary across the dataset; the first three values are taken
/// positionally as (name, artist, similarity).
fn similar_song_summary(entry: &SimilarSong) -> String {
    let mut values = entry.values();
    let name = values.next().map(display_value).unwrap_or_default();
    let artist = values.next().map(display_value).unwrap_or_default();
    let score = values.next().and_then(Value::as_f64).unwrap_or(0.0);
    format!("{} - {} ({:.1}%)", name, artist, score * 100.0)
}

/// First 100 characters of the lyric, ellipsis always appended.
fn lyric_excerpt(lyrics: &str) -> String {
    let mut excerpt: String = lyrics.chars().take(LYRIC_EXCERPT_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}

/// Flatten a song into the export's 31 string fields, in header order.
fn flatten(song: &Song) -> Vec<String> {
    let mut fields = vec![
        song.artist.clone(),
        song.song.clone(),
        song.album.clone(),
        song.genre.clone(),
        song.length.clone(),
        song.emotion.clone(),
        song.popularity.clone(),
        song.release_date.clone().unwrap_or_else(|| "N/A".to_string()),
        song.key.clone(),
        format!("{}", song.tempo),
        format!("{}%", song.energy),
        format!("{}%", song.danceability),
        format!("{}%", song.positiveness),
        format!("{}%", song.liveness),
        format!("{}%", song.acousticness),
        format!("{}%", song.speechiness),
        format!("{:.2} dB", song.loudness_db),
        song.time_signature.clone(),
        song.explicit.clone(),
        format!("{}%", song.instrumentalness),
        lyric_excerpt(&song.lyrics),
    ];
    for (_, flag) in song.suitability_flags() {
        fields.push(flag.to_string());
    }
    fields.push(
        song.similar_songs
            .iter()
            .map(similar_song_summary)
            .collect::<Vec<_>>()
            .join("; "),
    );
    fields
}

/// Escape a field: double embedded quotes, then wrap in quotes iff the value
/// contains a comma, newline, or quote.
fn escape_field(value: &str) -> String {
    let escaped = value.replace('"', "\"\"");
    if escaped.contains(',') || escaped.contains('\n') || escaped.contains('"') {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

/// Serialize the full song sequence as a CSV document: a header line plus one
/// row per song, rows joined by newlines.
pub fn to_csv(songs: &[Song]) -> String {
    let mut lines = vec![EXPORT_HEADER.join(",")];
    for song in songs {
        let row: Vec<String> = flatten(song).iter().map(|f| escape_field(f)).collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Write the CSV export into `dir` under the fixed filename. Returns the
/// written path.
pub fn write_export(dir: &Path, songs: &[Song]) -> Result<PathBuf> {
    let path = dir.join(EXPORT_FILENAME);
    std::fs::write(&path, to_csv(songs))
        .with_context(|| format!("Failed to write export: {}", path.display()))?;
    Ok(path)
}

/// Songs per progress event from the export thread.
const PROGRESS_CHUNK: usize = 10;

/// Export on the calling (worker) thread, reporting progress over `tx`.
/// Receiver hangups are ignored; the TUI may have quit mid-export.
pub fn export_async(songs: Vec<Song>, dir: PathBuf, tx: Sender<ExportEvent>) {
    let total = songs.len();
    let mut lines = vec![EXPORT_HEADER.join(",")];
    for (i, song) in songs.iter().enumerate() {
        let row: Vec<String> = flatten(song).iter().map(|f| escape_field(f)).collect();
        lines.push(row.join(","));
        if (i + 1) % PROGRESS_CHUNK == 0 || i + 1 == total {
            let _ = tx.send(ExportEvent::Progress { done: i + 1, total });
        }
    }
    let path = dir.join(EXPORT_FILENAME);
    match std::fs::write(&path, lines.join("\n")) {
        Ok(()) => {
            let _ = tx.send(ExportEvent::Completed { path });
        }
        Err(e) => {
            let _ = tx.send(ExportEvent::Failed {
                message: e.to_string(),
            });
        }
    }
}
