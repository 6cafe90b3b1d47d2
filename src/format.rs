use crate::models::Song;

/// Release date for display, `N/A` when the record carries none.
pub fn release_date_display(song: &Song) -> &str {
    song.release_date.as_deref().unwrap_or("N/A")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut s: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        s.push('\u{2026}');
        s
    }
}

/// Format the song sequence as a plain text table.
pub fn format_table(songs: &[Song]) -> String {
    let separator = "\u{2500}".repeat(100);
    let mut output = String::new();

    output.push_str(&format!(
        "{:<25} {:<25} {:<14} {:>7} {:<9} {:>10}  {}\n",
        "Artist", "Song", "Genre", "Length", "Emotion", "Popularity", "Release Date"
    ));
    output.push_str(&separator);
    output.push('\n');

    for song in songs {
        output.push_str(&format!(
            "{:<25} {:<25} {:<14} {:>7} {:<9} {:>10}  {}\n",
            truncate(&song.artist, 25),
            truncate(&song.song, 25),
            truncate(&song.genre, 14),
            song.length,
            truncate(&song.emotion, 9),
            song.popularity,
            release_date_display(song),
        ));
    }

    output.push_str(&separator);
    output.push('\n');
    output.push_str(&format!("Number of songs: {}", songs.len()));

    output
}

/// Format the song sequence as pretty-printed JSON.
pub fn format_json(songs: &[Song]) -> String {
    serde_json::to_string_pretty(songs).unwrap_or_else(|_| "[]".to_string())
}
