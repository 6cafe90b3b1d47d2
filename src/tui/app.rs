use std::collections::HashSet;
use std::path::PathBuf;

use crate::models::Song;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Main,
    About,
    Export,
}

pub struct App {
    pub songs: Vec<Song>,
    pub view: View,
    pub selected: usize,
    pub scroll_offset: usize,
    pub should_quit: bool,
    /// Row indices whose detail view is open.
    pub expanded: HashSet<usize>,
    /// Guards re-entrant export while the worker thread runs.
    pub exporting: bool,
    pub export_progress: Option<(usize, usize)>,
    pub export_message: Option<String>,
    pub dataset_path: PathBuf,
    /// Directory the export is written into.
    pub export_dir: PathBuf,
    /// Visible height of the song table (updated each frame by the renderer)
    pub visible_rows: usize,
}

impl App {
    pub fn new(songs: Vec<Song>, dataset_path: PathBuf, export_dir: PathBuf) -> Self {
        Self {
            songs,
            view: View::Main,
            selected: 0,
            scroll_offset: 0,
            should_quit: false,
            expanded: HashSet::new(),
            exporting: false,
            export_progress: None,
            export_message: None,
            dataset_path,
            export_dir,
            visible_rows: 20,
        }
    }

    pub fn select_next(&mut self) {
        if !self.songs.is_empty() {
            self.selected = (self.selected + 1).min(self.songs.len() - 1);
            self.ensure_visible();
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.ensure_visible();
    }

    pub fn toggle_expanded(&mut self) {
        if self.songs.is_empty() {
            return;
        }
        if !self.expanded.remove(&self.selected) {
            self.expanded.insert(self.selected);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// The song whose detail panel is showing, if the selection is expanded.
    pub fn detail_song(&self) -> Option<&Song> {
        if self.is_expanded(self.selected) {
            self.songs.get(self.selected)
        } else {
            None
        }
    }

    pub fn can_export(&self) -> bool {
        !self.exporting && !self.songs.is_empty()
    }

    /// Adjust scroll_offset so that self.selected is within the visible window.
    fn ensure_visible(&mut self) {
        if self.visible_rows == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = self.selected - self.visible_rows + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(count: usize) -> App {
        let line = r#"{"Artist(s)":"A","song":"S","text":"w","Length":"1:00","emotion":"joy","Genre":"pop","Album":"Al","Release Date":null,"Key":"C Maj","Tempo":100.0,"Loudness (db)":-5.0,"Time signature":"4/4","Explicit":"No","Popularity":"1","Energy":"1","Danceability":"1","Positiveness":"1","Speechiness":"1","Liveness":"1","Acousticness":"1","Instrumentalness":"1","Good for Party":0,"Good for Work/Study":0,"Good for Relaxation/Meditation":0,"Good for Exercise":0,"Good for Running":0,"Good for Yoga/Stretching":0,"Good for Driving":0,"Good for Social Gatherings":0,"Good for Morning Routine":0,"Similar Songs":[]}"#;
        let songs = (0..count).map(|_| serde_json::from_str(line).unwrap()).collect();
        App::new(songs, PathBuf::from("songs.json"), PathBuf::from("."))
    }

    #[test]
    fn test_toggle_expanded_is_per_row() {
        let mut app = app_with(3);
        app.toggle_expanded();
        assert!(app.is_expanded(0));
        app.select_next();
        assert!(app.detail_song().is_none());
        app.toggle_expanded();
        assert!(app.is_expanded(0));
        assert!(app.is_expanded(1));
        app.toggle_expanded();
        assert!(!app.is_expanded(1));
        assert!(app.is_expanded(0));
    }

    #[test]
    fn test_selection_clamped() {
        let mut app = app_with(2);
        app.select_prev();
        assert_eq!(app.selected, 0);
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut app = app_with(50);
        app.visible_rows = 10;
        for _ in 0..20 {
            app.select_next();
        }
        assert_eq!(app.selected, 20);
        assert_eq!(app.scroll_offset, 11);
        for _ in 0..20 {
            app.select_prev();
        }
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_export_guard() {
        let mut app = app_with(1);
        assert!(app.can_export());
        app.exporting = true;
        assert!(!app.can_export());

        let empty = app_with(0);
        assert!(!empty.can_export());
    }
}
