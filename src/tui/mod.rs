pub mod app;
pub mod ui;

use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::export;
use crate::models::{ExportEvent, Song};

use app::{App, View};

pub fn run(songs: Vec<Song>, dataset_path: &Path) -> Result<()> {
    if songs.is_empty() {
        anyhow::bail!("No songs in {}", dataset_path.display());
    }

    // Exports land next to the dataset file
    let export_dir = dataset_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let mut app = App::new(songs, dataset_path.to_path_buf(), export_dir);

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

fn start_export(app: &mut App) -> mpsc::Receiver<ExportEvent> {
    let (tx, rx) = mpsc::channel::<ExportEvent>();
    let songs = app.songs.clone();
    let dir = app.export_dir.clone();
    std::thread::spawn(move || {
        export::export_async(songs, dir, tx);
    });
    app.exporting = true;
    app.export_progress = Some((0, app.songs.len()));
    app.export_message = None;
    rx
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut export_rx: Option<mpsc::Receiver<ExportEvent>> = None;

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;
        // Note: ui::render updates app.visible_rows each frame

        // Drain export events
        if let Some(rx) = &export_rx {
            let mut finished = false;
            while let Ok(event) = rx.try_recv() {
                match event {
                    ExportEvent::Progress { done, total } => {
                        app.export_progress = Some((done, total));
                    }
                    ExportEvent::Completed { path } => {
                        app.export_message = Some(format!("Saved to {}", path.display()));
                        finished = true;
                    }
                    ExportEvent::Failed { message } => {
                        app.export_message = Some(format!("Error: {}", message));
                        finished = true;
                    }
                }
            }
            if finished {
                app.exporting = false;
                app.export_progress = None;
                export_rx = None;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.view {
                    View::Main => match key.code {
                        KeyCode::Char('q') => {
                            app.should_quit = true;
                            break;
                        }
                        KeyCode::Char('e') => {
                            if app.can_export() {
                                app.view = View::Export;
                                app.export_message = None;
                            }
                        }
                        KeyCode::Char('a') => {
                            app.view = View::About;
                        }
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            app.toggle_expanded();
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            app.select_next();
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            app.select_prev();
                        }
                        _ => {}
                    },
                    View::About => match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => {
                            app.view = View::Main;
                        }
                        _ => {}
                    },
                    View::Export => match key.code {
                        KeyCode::Esc => {
                            app.view = View::Main;
                        }
                        KeyCode::Enter => {
                            if app.can_export() {
                                export_rx = Some(start_export(app));
                            }
                        }
                        _ => {}
                    },
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
