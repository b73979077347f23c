use std::mem;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::db::{delete_song, fetch_song, toggle_favorite};
use crate::library::ListEntry;
use crate::models::Song;
use crate::playback::{MediaEngine, PlaybackController, PlaybackState};
use crate::resources::ResourceBundle;

use super::helpers::{
    category_tags, centered_rect, format_time, playback_label, progress_ratio, surface_error,
};
use super::screens::{CategoryScreen, ConfirmSongDelete, SongListScreen, SongScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Jump applied by the left/right arrows in the song view.
const SEEK_STEP: Duration = Duration::from_secs(5);
/// Rows moved by PageUp/PageDown.
const PAGE: isize = 10;

/// Which screen is on top. Screens nest: categories, then a song list, then a
/// single song.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScreenKind {
    Categories,
    Songs,
    Song,
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    ConfirmSongDelete(ConfirmSongDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    conn: Connection,
    bundle: ResourceBundle,
    player: PlaybackController,
    categories: CategoryScreen,
    list: Option<SongListScreen>,
    view: Option<SongScreen>,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(
        conn: Connection,
        bundle: ResourceBundle,
        engine: Box<dyn MediaEngine>,
    ) -> Result<Self> {
        let categories = CategoryScreen::load(&conn)?;
        let player = PlaybackController::new(engine, bundle.clone());
        Ok(Self {
            conn,
            bundle,
            player,
            categories,
            list: None,
            view: None,
            mode: Mode::Normal,
            status: None,
        })
    }

    fn screen(&self) -> ScreenKind {
        if self.view.is_some() {
            ScreenKind::Song
        } else if self.list.is_some() {
            ScreenKind::Songs
        } else {
            ScreenKind::Categories
        }
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        let outcome = match mode {
            Mode::Normal => match self.screen() {
                ScreenKind::Categories => self.handle_categories_key(code, &mut exit),
                ScreenKind::Songs => self.handle_songs_key(code, &mut exit),
                ScreenKind::Song => self.handle_song_key(code, &mut exit),
            },
            Mode::ConfirmSongDelete(confirm) => self.handle_confirm_song_delete(code, confirm),
        };

        // Store failures after startup end up in the footer; the session goes on.
        self.mode = match outcome {
            Ok(mode) => mode,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "store operation failed");
                self.set_status(surface_error(&err), StatusKind::Error);
                Mode::Normal
            }
        };

        if exit {
            self.player.stop();
        }
        Ok(exit)
    }

    /// Called on every loop iteration so playback observers reach the UI.
    pub fn tick(&mut self) {
        self.player.sync();
    }

    fn handle_categories_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => self.categories.move_selection(-1),
            KeyCode::Down => self.categories.move_selection(1),
            KeyCode::PageUp => self.categories.move_selection(-PAGE),
            KeyCode::PageDown => self.categories.move_selection(PAGE),
            KeyCode::Enter => {
                self.clear_status();
                let screen = SongListScreen::open(&self.conn, self.categories.choice())?;
                self.list = Some(screen);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_songs_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let Some(list) = self.list.as_mut() else {
            return Ok(Mode::Normal);
        };

        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                self.categories.reload(&self.conn)?;
                self.list = None;
                self.clear_status();
            }
            KeyCode::Up => list.move_selection(-1),
            KeyCode::Down => list.move_selection(1),
            KeyCode::PageUp => list.move_selection(-PAGE),
            KeyCode::PageDown => list.move_selection(PAGE),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                let key = list.cycle_sort(&self.conn)?;
                self.set_status(format!("Sorted by {key}."), StatusKind::Info);
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                if let Some(song) = list.current_song().cloned() {
                    self.toggle_favorite(&song)?;
                } else {
                    self.set_status("No song selected.", StatusKind::Error);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(song) = list.current_song().cloned() {
                    self.clear_status();
                    return Ok(Mode::ConfirmSongDelete(ConfirmSongDelete { song }));
                }
                self.set_status("No song selected to delete.", StatusKind::Error);
            }
            KeyCode::Enter => {
                if let Some(song) = list.current_song().cloned() {
                    self.open_song_view(song)?;
                } else {
                    self.set_status("No song selected.", StatusKind::Error);
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_song_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let Some(view) = self.view.as_ref() else {
            return Ok(Mode::Normal);
        };
        let song = view.song.clone();

        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc | KeyCode::Backspace => self.close_song_view()?,
            KeyCode::Char(' ') => self.player.toggle(),
            KeyCode::Left => self.player.skip(false, SEEK_STEP),
            KeyCode::Right => self.player.skip(true, SEEK_STEP),
            KeyCode::Home => self.player.seek(Duration::ZERO),
            KeyCode::Char('o') | KeyCode::Char('O') => match self.bundle.open_document(&song) {
                Ok(path) => {
                    info!(path = %path.display(), "opened song sheet");
                    self.set_status("Opened song sheet in the document viewer.", StatusKind::Info);
                }
                Err(err) => {
                    warn!(error = %err, song = %song.title, "could not open song sheet");
                    self.set_status(err.to_string(), StatusKind::Error);
                }
            },
            KeyCode::Char('f') | KeyCode::Char('F') => self.toggle_favorite(&song)?,
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_confirm_song_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmSongDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                match delete_song(&self.conn, confirm.song.id) {
                    Ok(()) => {
                        if let Some(list) = self.list.as_mut() {
                            list.refresh(&self.conn, None)?;
                        }
                        info!(song = %confirm.song.title, "song deleted");
                        self.set_status(
                            format!("Deleted '{}'.", confirm.song.title),
                            StatusKind::Info,
                        );
                    }
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.clear_status();
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmSongDelete(confirm)),
        }
    }

    fn open_song_view(&mut self, song: Song) -> Result<()> {
        let view = SongScreen::load(&self.conn, song)?;
        self.clear_status();
        self.player.setup(&view.song);
        if let PlaybackState::Failed(err) = self.player.state() {
            self.set_status(err.to_string(), StatusKind::Error);
        }
        self.view = Some(view);
        Ok(())
    }

    fn close_song_view(&mut self) -> Result<()> {
        self.player.stop();
        let focus = self.view.take().map(|view| view.song.id);
        self.clear_status();
        if let Some(list) = self.list.as_mut() {
            list.refresh(&self.conn, focus)?;
        }
        Ok(())
    }

    /// Persist the flipped favorite flag and mirror it into whichever screens
    /// show the song.
    fn toggle_favorite(&mut self, song: &Song) -> Result<()> {
        let favorite = match toggle_favorite(&self.conn, song.id) {
            Ok(favorite) => favorite,
            Err(err) => {
                self.set_status(surface_error(&err), StatusKind::Error);
                return Ok(());
            }
        };

        if let Some(view) = self.view.as_mut() {
            if view.song.id == song.id {
                view.song = fetch_song(&self.conn, song.id)?;
            }
        }
        if let Some(list) = self.list.as_mut() {
            list.refresh(&self.conn, Some(song.id))?;
        }

        let message = if favorite {
            format!("Added '{}' to favorites.", song.title)
        } else {
            format!("Removed '{}' from favorites.", song.title)
        };
        self.set_status(message, StatusKind::Info);
        Ok(())
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match self.screen() {
            ScreenKind::Categories => self.draw_categories(frame, content_area),
            ScreenKind::Songs => {
                if let Some(list) = &self.list {
                    self.draw_song_list(frame, content_area, list);
                }
            }
            ScreenKind::Song => {
                if let Some(view) = &self.view {
                    self.draw_song_view(frame, content_area, view);
                }
            }
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::ConfirmSongDelete(confirm) = &self.mode {
            self.draw_confirm_song_delete(frame, area, confirm);
        }
    }

    fn draw_categories(&self, frame: &mut Frame, area: Rect) {
        let count_style = Style::default().fg(Color::Gray);
        let mut items = vec![ListItem::new(Line::from(Span::styled(
            "All Songs",
            Style::default().add_modifier(Modifier::BOLD),
        )))];
        items.extend(self.categories.summaries.iter().map(|summary| {
            ListItem::new(Line::from(vec![
                Span::raw(summary.category.name.clone()),
                Span::styled(format!("  {} Songs", summary.song_count), count_style),
            ]))
        }));

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Categories"))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(Some(self.categories.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_song_list(&self, frame: &mut Frame, area: Rect, screen: &SongListScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                screen.list.title().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::raw(format!(
                "{} songs  •  sorted by {}",
                screen.list.len(),
                screen.list.sort_key()
            ))),
        ])
        .block(Block::default().borders(Borders::ALL).title("Songs"));
        frame.render_widget(header, chunks[0]);

        if screen.list.is_empty() {
            let message = Paragraph::new("No songs here yet.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
            return;
        }

        let entries = screen.list.entries();
        let items: Vec<ListItem> = entries
            .iter()
            .map(|entry| match entry {
                ListEntry::Header(key) => ListItem::new(Line::from(Span::styled(
                    format!("— {key} —"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))),
                ListEntry::Song(song) => song_item(song),
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(screen.selected_entry(&entries));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_song_view(&self, frame: &mut Frame, area: Rect, view: &SongScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(7), Constraint::Length(5)])
            .split(area);

        let song = &view.song;
        let favorite = if song.is_favorite { "★ Favorite" } else { "☆" };
        let artist = if song.artist.trim().is_empty() {
            "Unknown Artist"
        } else {
            song.artist.trim()
        };
        let details = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(
                    song.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(favorite, Style::default().fg(Color::Yellow)),
            ]),
            Line::from(Span::raw(artist.to_string())),
            Line::from(Span::styled(
                song.first_line.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            category_tags(&view.categories),
            Line::from(Span::styled(
                format!(
                    "Sheet: {}",
                    if song.has_media() {
                        format!("{}.pdf", song.filename)
                    } else {
                        "N/A".to_string()
                    }
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Song"));
        frame.render_widget(details, chunks[0]);

        let (label, style) = playback_label(self.player.state());
        let block = Block::default().borders(Borders::ALL).title("Playback");
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(Paragraph::new(Span::styled(label, style)), rows[0]);

        let elapsed = self.player.elapsed();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(progress_ratio(elapsed, self.player.duration()))
            .label(format!(
                "{}  -{}",
                format_time(elapsed),
                format_time(self.player.remaining())
            ));
        frame.render_widget(gauge, rows[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match (&self.mode, self.screen()) {
            (Mode::ConfirmSongDelete(_), _) => &[("[y]", "Delete"), ("[n]", "Cancel")],
            (Mode::Normal, ScreenKind::Categories) => {
                &[("[↑↓]", "Navigate"), ("[Enter]", "Open"), ("[q]", "Quit")]
            }
            (Mode::Normal, ScreenKind::Songs) => &[
                ("[↑↓]", "Navigate"),
                ("[Enter]", "Open"),
                ("[s]", "Sort"),
                ("[f]", "Favorite"),
                ("[d]", "Delete"),
                ("[Esc]", "Back"),
            ],
            (Mode::Normal, ScreenKind::Song) => &[
                ("[Space]", "Play/Pause"),
                ("[←→]", "Seek"),
                ("[o]", "Open sheet"),
                ("[f]", "Favorite"),
                ("[Esc]", "Back"),
            ],
        };

        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, action) in hints {
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::raw(format!(" {action}   ")));
        }
        Line::from(spans)
    }

    fn draw_confirm_song_delete(
        &self,
        frame: &mut Frame,
        area: Rect,
        confirm: &ConfirmSongDelete,
    ) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from(Span::raw("Delete this song permanently?")),
            Line::from(Span::styled(
                confirm.song.display_title(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[y] Delete   [n] Cancel",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Confirm"));
        frame.render_widget(paragraph, popup_area);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Two-line list row: title with favorite marker and artist, then the first
/// line in gray.
fn song_item(song: &Song) -> ListItem<'static> {
    let marker = if song.is_favorite { "★ " } else { "  " };
    let mut title = vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(
            song.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if !song.artist.trim().is_empty() {
        title.push(Span::styled(
            format!("  {}", song.artist.trim()),
            Style::default().fg(Color::Gray),
        ));
    }

    ListItem::new(vec![
        Line::from(title),
        Line::from(Span::styled(
            format!("  {}", song.first_line),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

#[cfg(test)]
mod tests {
    use std::fs;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::TempDir;

    use super::*;
    use crate::db::{open_in_memory, open_store, seed_sample_songs};
    use crate::error::MediaError;
    use crate::models::SortKey;
    use crate::playback::SilentEngine;

    fn app() -> (TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sample_song_1.mp3"), b"mp3").unwrap();
        let mut conn = open_in_memory().unwrap();
        seed_sample_songs(&mut conn).unwrap();
        let app = App::new(conn, ResourceBundle::new(dir.path()), Box::new(SilentEngine)).unwrap();
        (dir, app)
    }

    fn render(app: &App) {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
    }

    #[test]
    fn navigates_from_categories_into_a_song_and_back() {
        let (_dir, mut app) = app();
        render(&app);

        app.handle_key(KeyCode::Down).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.screen(), ScreenKind::Songs);
        assert_eq!(app.list.as_ref().unwrap().list.title(), "Even");
        assert_eq!(app.list.as_ref().unwrap().list.len(), 5);
        render(&app);

        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.screen(), ScreenKind::Song);
        assert!(matches!(app.player.state(), PlaybackState::Setup(_)));
        app.handle_key(KeyCode::Char(' ')).unwrap();
        app.tick();
        assert!(app.player.is_playing());
        render(&app);

        app.handle_key(KeyCode::Esc).unwrap();
        assert_eq!(app.screen(), ScreenKind::Songs);
        assert_eq!(app.player.state(), &PlaybackState::Stopped);

        app.handle_key(KeyCode::Esc).unwrap();
        assert_eq!(app.screen(), ScreenKind::Categories);
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn songs_without_audio_show_a_failed_state() {
        let (_dir, mut app) = app();
        app.handle_key(KeyCode::Enter).unwrap();
        app.handle_key(KeyCode::Down).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(matches!(
            app.player.state(),
            PlaybackState::Failed(MediaError::ResourceNotFound { .. })
        ));
        assert!(app.status.is_some());
        render(&app);
    }

    #[test]
    fn favorite_toggle_and_delete_update_the_list() {
        let (_dir, mut app) = app();
        app.handle_key(KeyCode::Enter).unwrap();
        let first = app.list.as_ref().unwrap().current_song().unwrap().clone();

        app.handle_key(KeyCode::Char('f')).unwrap();
        let current = app.list.as_ref().unwrap().current_song().unwrap().clone();
        assert_eq!(current.id, first.id);
        assert!(current.is_favorite);

        app.handle_key(KeyCode::Char('s')).unwrap();
        assert_eq!(app.list.as_ref().unwrap().list.sort_key(), SortKey::Artist);
        assert_eq!(
            app.list.as_ref().unwrap().current_song().unwrap().id,
            first.id
        );

        app.handle_key(KeyCode::Char('d')).unwrap();
        assert!(matches!(app.mode, Mode::ConfirmSongDelete(_)));
        render(&app);
        app.handle_key(KeyCode::Char('n')).unwrap();
        assert_eq!(app.list.as_ref().unwrap().list.len(), 10);

        app.handle_key(KeyCode::Char('d')).unwrap();
        app.handle_key(KeyCode::Char('y')).unwrap();
        let list = app.list.as_ref().unwrap();
        assert_eq!(list.list.len(), 9);
        assert!(list.list.songs().all(|s| s.id != first.id));
    }

    #[test]
    fn locked_store_is_reported_without_leaving_the_screen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("songbook.sqlite");
        let mut conn = open_store(&db_path).unwrap();
        seed_sample_songs(&mut conn).unwrap();
        conn.busy_timeout(Duration::from_millis(50)).unwrap();
        let mut app = App::new(conn, ResourceBundle::new(dir.path()), Box::new(SilentEngine)).unwrap();

        let other = Connection::open(&db_path).unwrap();
        other.execute_batch("BEGIN EXCLUSIVE;").unwrap();

        assert!(!app.handle_key(KeyCode::Enter).unwrap());
        assert_eq!(app.screen(), ScreenKind::Categories);
        assert!(matches!(
            app.status,
            Some(StatusMessage {
                kind: StatusKind::Error,
                ..
            })
        ));
        render(&app);

        other.execute_batch("COMMIT;").unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.screen(), ScreenKind::Songs);
        assert!(app.status.is_none());

        other.execute_batch("BEGIN EXCLUSIVE;").unwrap();
        assert!(!app.handle_key(KeyCode::Char('s')).unwrap());
        assert!(!app.handle_key(KeyCode::Esc).unwrap());
        assert_eq!(app.screen(), ScreenKind::Songs);
        assert_eq!(app.list.as_ref().unwrap().list.sort_key(), SortKey::Title);
        other.execute_batch("COMMIT;").unwrap();
    }
}
