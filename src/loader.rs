use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Song;

/// Parse a newline-delimited JSON document: one song per non-empty line,
/// in file order. Fails on the first malformed line.
pub fn parse_songs(text: &str) -> Result<Vec<Song>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Malformed song record on line {}", i + 1))
        })
        .collect()
}

/// Load songs from a dataset file on disk.
pub fn load_file(path: &Path) -> Result<Vec<Song>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    parse_songs(&text)
}

/// Load songs from STDIN (the `-` path sentinel).
pub fn load_stdin() -> Result<Vec<Song>> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read dataset from STDIN")?;
    parse_songs(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = r#"{"Artist(s)":"A","song":"S","text":"words","Length":"2:10","emotion":"joy","Genre":"pop","Album":"Al","Release Date":"1999-01-01","Key":"C Maj","Tempo":120.0,"Loudness (db)":-6.5,"Time signature":"4/4","Explicit":"No","Popularity":"10","Energy":"50","Danceability":"50","Positiveness":"50","Speechiness":"5","Liveness":"10","Acousticness":"20","Instrumentalness":"0","Good for Party":0,"Good for Work/Study":1,"Good for Relaxation/Meditation":0,"Good for Exercise":0,"Good for Running":0,"Good for Yoga/Stretching":0,"Good for Driving":0,"Good for Social Gatherings":0,"Good for Morning Routine":1,"Similar Songs":[]}"#;

    #[test]
    fn test_parse_preserves_file_order() {
        let mut doc = String::new();
        for i in 0..3 {
            doc.push_str(&LINE.replace(r#""song":"S""#, &format!(r#""song":"S{}""#, i)));
            doc.push('\n');
        }
        let songs = parse_songs(&doc).unwrap();
        assert_eq!(songs.len(), 3);
        assert_eq!(songs[0].song, "S0");
        assert_eq!(songs[2].song, "S2");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let doc = format!("\n{}\n\n{}\n", LINE, LINE);
        let songs = parse_songs(&doc).unwrap();
        assert_eq!(songs.len(), 2);
    }

    #[test]
    fn test_malformed_line_aborts_with_line_number() {
        let doc = format!("{}\nnot json\n{}\n", LINE, LINE);
        let err = parse_songs(&doc).unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {}", err);
    }

    #[test]
    fn test_empty_document_yields_no_songs() {
        assert!(parse_songs("").unwrap().is_empty());
        assert!(parse_songs("\n\n").unwrap().is_empty());
    }
}
