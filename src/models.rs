use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One similar-song entry. The dataset does not fix the key names; by
/// convention the first three values are (name, artist, similarity in [0,1]),
/// which is why `serde_json` runs with `preserve_order`.
pub type SimilarSong = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    #[serde(rename = "Artist(s)")]
    pub artist: String,
    pub song: String,
    /// Full lyrics.
    #[serde(rename = "text")]
    pub lyrics: String,
    #[serde(rename = "Length")]
    pub length: String,
    pub emotion: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Album")]
    pub album: String,
    #[serde(rename = "Release Date")]
    pub release_date: Option<String>,
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Tempo")]
    pub tempo: f64,
    #[serde(rename = "Loudness (db)")]
    pub loudness_db: f64,
    #[serde(rename = "Time signature")]
    pub time_signature: String,
    #[serde(rename = "Explicit")]
    pub explicit: String,
    #[serde(rename = "Popularity")]
    pub popularity: String,
    #[serde(rename = "Energy")]
    pub energy: String,
    #[serde(rename = "Danceability")]
    pub danceability: String,
    #[serde(rename = "Positiveness")]
    pub positiveness: String,
    #[serde(rename = "Speechiness")]
    pub speechiness: String,
    #[serde(rename = "Liveness")]
    pub liveness: String,
    #[serde(rename = "Acousticness")]
    pub acousticness: String,
    #[serde(rename = "Instrumentalness")]
    pub instrumentalness: String,
    #[serde(rename = "Good for Party")]
    pub good_for_party: u8,
    #[serde(rename = "Good for Work/Study")]
    pub good_for_work_study: u8,
    #[serde(rename = "Good for Relaxation/Meditation")]
    pub good_for_relaxation: u8,
    #[serde(rename = "Good for Exercise")]
    pub good_for_exercise: u8,
    #[serde(rename = "Good for Running")]
    pub good_for_running: u8,
    #[serde(rename = "Good for Yoga/Stretching")]
    pub good_for_yoga: u8,
    #[serde(rename = "Good for Driving")]
    pub good_for_driving: u8,
    #[serde(rename = "Good for Social Gatherings")]
    pub good_for_social: u8,
    #[serde(rename = "Good for Morning Routine")]
    pub good_for_morning: u8,
    #[serde(rename = "Similar Songs")]
    pub similar_songs: Vec<SimilarSong>,
}

impl Song {
    /// Suitability flags paired with their display labels, in fixed order.
    pub fn suitability_flags(&self) -> [(&'static str, u8); 9] {
        [
            ("Party", self.good_for_party),
            ("Work/Study", self.good_for_work_study),
            ("Relaxation", self.good_for_relaxation),
            ("Exercise", self.good_for_exercise),
            ("Running", self.good_for_running),
            ("Yoga", self.good_for_yoga),
            ("Driving", self.good_for_driving),
            ("Social", self.good_for_social),
            ("Morning", self.good_for_morning),
        ]
    }

    /// The activity labels this song is recommended for, in display order.
    pub fn usage_contexts(&self) -> Vec<&'static str> {
        self.suitability_flags()
            .into_iter()
            .filter(|(_, flag)| *flag == 1)
            .map(|(label, _)| label)
            .collect()
    }
}

/// Sent from the export thread to the TUI for live progress
pub enum ExportEvent {
    Progress { done: usize, total: usize },
    Completed { path: PathBuf },
    Failed { message: String },
}
