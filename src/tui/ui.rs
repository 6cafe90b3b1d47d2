use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use super::app::{App, View};
use crate::export::EXPORT_FILENAME;
use crate::format::release_date_display;
use crate::models::Song;

const ACCENT: Color = Color::Magenta;
const DIM: Color = Color::DarkGray;
const OK_COLOR: Color = Color::Green;
const PROGRESS_COLOR: Color = Color::Yellow;

pub fn render(frame: &mut Frame, app: &mut App) {
    let detail_height = if app.detail_song().is_some() { 14 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Min(5),                // Song table
            Constraint::Length(detail_height), // Detail panel
            Constraint::Length(1),             // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_song_table(frame, app, chunks[1]);
    if let Some(song) = app.detail_song() {
        render_detail(frame, song, chunks[2]);
    }
    render_footer(frame, app, chunks[3]);

    // Overlays
    match app.view {
        View::About => render_about_overlay(frame),
        View::Export => render_export_overlay(frame, app),
        View::Main => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let count_text = format!("{} songs loaded", app.songs.len());
    let path_text = app.dataset_path.display().to_string();

    let text = vec![Line::from(vec![
        Span::styled(
            count_text,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Dataset: ", Style::default().fg(DIM)),
        Span::styled(path_text, Style::default().fg(DIM)),
    ])];

    let block = Block::default()
        .title(Span::styled(
            " Songdex ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}

fn render_song_table(frame: &mut Frame, app: &mut App, area: Rect) {
    // 2 for borders, 1 for header
    let inner_height = area.height.saturating_sub(3) as usize;
    app.visible_rows = inner_height;

    // Build a scroll indicator for the block title
    let total = app.songs.len();
    let scroll_info = if total > inner_height {
        let has_above = app.scroll_offset > 0;
        let has_below = app.scroll_offset + inner_height < total;
        match (has_above, has_below) {
            (true, true) => format!(
                " [{}-{}/{}] \u{2191}\u{2193} ",
                app.scroll_offset + 1,
                (app.scroll_offset + inner_height).min(total),
                total
            ),
            (true, false) => format!(" [{}-{}/{}] \u{2191} ", app.scroll_offset + 1, total, total),
            (false, true) => format!(" [1-{}/{}] \u{2193} ", inner_height.min(total), total),
            (false, false) => String::new(),
        }
    } else {
        String::new()
    };

    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(DIM)),
        Cell::from("").style(Style::default().fg(DIM)),
        Cell::from("Artist").style(Style::default().fg(DIM)),
        Cell::from("Song").style(Style::default().fg(DIM)),
        Cell::from("Album").style(Style::default().fg(DIM)),
        Cell::from("Genre").style(Style::default().fg(DIM)),
        Cell::from("Length").style(Style::default().fg(DIM)),
        Cell::from("Emotion").style(Style::default().fg(DIM)),
        Cell::from("Pop").style(Style::default().fg(DIM)),
        Cell::from("Released").style(Style::default().fg(DIM)),
    ])
    .height(1);

    // Only render the visible slice of songs
    let end = (app.scroll_offset + inner_height).min(app.songs.len());
    let visible_slice = &app.songs[app.scroll_offset..end];

    let rows: Vec<Row> = visible_slice
        .iter()
        .enumerate()
        .map(|(vi, song)| {
            let actual_index = app.scroll_offset + vi;
            let num = format!("{}", actual_index + 1);
            let marker = if app.is_expanded(actual_index) {
                "\u{25bc}"
            } else {
                "\u{25b6}"
            };
            let is_selected = actual_index == app.selected;
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(num).style(Style::default().fg(DIM)),
                Cell::from(marker).style(Style::default().fg(ACCENT)),
                Cell::from(song.artist.as_str())
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(song.song.as_str()),
                Cell::from(song.album.as_str()),
                Cell::from(song.genre.as_str()),
                Cell::from(song.length.as_str()),
                Cell::from(song.emotion.as_str())
                    .style(Style::default().fg(emotion_color(&song.emotion))),
                Cell::from(song.popularity.as_str()),
                Cell::from(release_date_display(song)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Min(16),
        Constraint::Min(16),
        Constraint::Min(12),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(4),
        Constraint::Length(10),
    ];

    let block = Block::default()
        .title(Span::styled(scroll_info, Style::default().fg(DIM)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    frame.render_widget(table, area);
}

fn render_detail(frame: &mut Frame, song: &Song, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_lyrics_pane(frame, song, halves[0]);
    render_features_pane(frame, song, halves[1]);
}

fn render_lyrics_pane(frame: &mut Frame, song: &Song, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Lyrics ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM));

    let lines: Vec<Line> = song.lyrics.split('\n').map(Line::from).collect();
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_features_pane(frame: &mut Frame, song: &Song, area: Rect) {
    let label = |s: &'static str| Span::styled(s, Style::default().fg(DIM));

    let contexts = song.usage_contexts();
    let contexts_text = if contexts.is_empty() {
        "No specific recommendations".to_string()
    } else {
        contexts.join(", ")
    };

    let similar: Vec<String> = song
        .similar_songs
        .iter()
        .map(|entry| {
            let mut values = entry.values();
            let name = values
                .next()
                .and_then(|v| v.as_str())
                .unwrap_or("?")
                .to_string();
            let artist = values
                .next()
                .and_then(|v| v.as_str())
                .unwrap_or("?")
                .to_string();
            let score = values.next().and_then(|v| v.as_f64()).unwrap_or(0.0);
            format!("{} \u{2014} {} ({:.1}%)", name, artist, score * 100.0)
        })
        .collect();

    let mut text = vec![
        Line::from(vec![
            label("Key: "),
            Span::raw(song.key.clone()),
            Span::raw("   "),
            label("Tempo: "),
            Span::raw(format!("{:.3}", song.tempo)),
            Span::raw("   "),
            label("Loudness: "),
            Span::raw(format!("{:.2} dB", song.loudness_db)),
            Span::raw("   "),
            label("Time sig: "),
            Span::raw(song.time_signature.clone()),
        ]),
        Line::from(vec![
            label("Energy: "),
            Span::raw(format!("{}%", song.energy)),
            Span::raw("   "),
            label("Danceability: "),
            Span::raw(format!("{}%", song.danceability)),
            Span::raw("   "),
            label("Positiveness: "),
            Span::raw(format!("{}%", song.positiveness)),
        ]),
        Line::from(vec![
            label("Liveness: "),
            Span::raw(format!("{}%", song.liveness)),
            Span::raw("   "),
            label("Acousticness: "),
            Span::raw(format!("{}%", song.acousticness)),
            Span::raw("   "),
            label("Speechiness: "),
            Span::raw(format!("{}%", song.speechiness)),
            Span::raw("   "),
            label("Instrumental: "),
            Span::raw(format!("{}%", song.instrumentalness)),
        ]),
        Line::from(vec![
            label("Explicit: "),
            Span::raw(song.explicit.clone()),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Good for: "),
            Span::styled(contexts_text, Style::default().fg(OK_COLOR)),
        ]),
        Line::from(""),
        Line::from(label("Similar songs:")),
    ];
    for entry in similar {
        text.push(Line::from(format!("  {}", entry)));
    }

    let block = Block::default()
        .title(Span::styled(" Details ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM));

    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let keys = match app.view {
        View::Main => "[Enter] expand/collapse  [e]xport  [a]bout  [q]uit",
        View::About => "[Esc] close",
        View::Export => "[Enter] save  [Esc] close",
    };
    let footer = Paragraph::new(keys)
        .style(Style::default().fg(DIM))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

fn render_about_overlay(frame: &mut Frame) {
    let area = centered_rect(44, 10, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            "Songdex",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Version {}", env!("CARGO_PKG_VERSION"))),
        Line::from(""),
        Line::from("Browser for line-delimited song datasets"),
        Line::from("with audio features and recommendations."),
        Line::from(""),
        Line::from(Span::styled("[Esc] close", Style::default().fg(DIM))),
    ];

    let block = Block::default()
        .title(" About ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(block);
    frame.render_widget(paragraph, area);
}

fn render_export_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect(56, 12, frame.area());
    frame.render_widget(Clear, area);

    let output_path = app.export_dir.join(EXPORT_FILENAME);

    let mut text = vec![
        Line::from(Span::styled(
            "Export CSV",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Songs: ", Style::default().fg(DIM)),
            Span::styled(app.songs.len().to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Output: ", Style::default().fg(DIM)),
            Span::styled(
                output_path.display().to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
    ];

    if let Some((done, total)) = app.export_progress {
        let bar_width = 24usize;
        let filled = if total > 0 {
            done * bar_width / total
        } else {
            bar_width
        };
        let bar = format!(
            "{}{} {}/{}",
            "\u{2588}".repeat(filled),
            "\u{2591}".repeat(bar_width - filled),
            done,
            total
        );
        text.push(Line::from(Span::styled(
            bar,
            Style::default().fg(PROGRESS_COLOR),
        )));
    } else {
        text.push(Line::from(Span::styled(
            "[Enter] save  [Esc] cancel",
            Style::default().fg(DIM),
        )));
    }

    if let Some(ref msg) = app.export_message {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            msg.as_str(),
            Style::default().fg(OK_COLOR),
        )));
    }

    let block = Block::default()
        .title(" Export ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(block);
    frame.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Badge color per emotion, matching the row badge palette.
fn emotion_color(emotion: &str) -> Color {
    match emotion {
        "joy" => Color::Green,
        "sadness" => Color::Blue,
        "anger" => Color::Red,
        "fear" => Color::Magenta,
        _ => Color::Gray,
    }
}
