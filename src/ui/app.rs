use anyhow::{Context, Error, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{error, info};

use crate::store::BookStore;

use super::forms::{BookField, BookForm};
use super::helpers::{book_entry_lines, key_hints, stats_lines, surface_error};
use super::screens::{AddScreen, Page, RemoveScreen, SearchScreen, StatsScreen, ViewScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the sidebar menu.
const MENU_WIDTH: u16 = 24;
/// Lines moved by PageUp/PageDown on the collection page.
const PAGE_STEP: isize = 10;

/// Which half of the screen receives key presses.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Focus {
    Menu,
    Content,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Page data is a snapshot
/// taken from the store whenever a page is opened or changed.
pub struct App {
    store: BookStore,
    page: Page,
    focus: Focus,
    add: AddScreen,
    remove: RemoveScreen,
    search: SearchScreen,
    view: ViewScreen,
    stats: StatsScreen,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: BookStore) -> Self {
        Self {
            store,
            page: Page::default(),
            focus: Focus::Menu,
            add: AddScreen::default(),
            remove: RemoveScreen::default(),
            search: SearchScreen::default(),
            view: ViewScreen::default(),
            stats: StatsScreen::default(),
            status: None,
        }
    }

    /// Page currently selected in the sidebar.
    pub fn page(&self) -> Page {
        self.page
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }

    /// Dispatch a key press. Returns `true` when the user asked to quit.
    /// Store failures never end the session; they land in the footer.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let outcome = match self.focus {
            Focus::Menu => self.handle_menu_key(code),
            Focus::Content => self.handle_content_key(code).map(|_| false),
        };

        match outcome {
            Ok(exit) => exit,
            Err(err) => {
                self.report_error(err);
                false
            }
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => self.open_page(self.page.previous())?,
            KeyCode::Down => self.open_page(self.page.next())?,
            KeyCode::Enter | KeyCode::Right | KeyCode::Tab => {
                self.focus = Focus::Content;
                self.refresh_page()?;
            }
            KeyCode::Char(ch) => {
                if let Some(page) = Page::from_shortcut(ch) {
                    self.open_page(page)?;
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_content_key(&mut self, code: KeyCode) -> Result<()> {
        if code == KeyCode::Esc {
            self.focus = Focus::Menu;
            return Ok(());
        }

        match self.page {
            Page::AddBook => self.handle_add_key(code),
            Page::RemoveBook => self.handle_remove_key(code),
            Page::SearchBooks => self.handle_search_key(code),
            Page::ViewBooks => {
                match code {
                    KeyCode::Up => self.view.scroll_by(-1),
                    KeyCode::Down => self.view.scroll_by(1),
                    KeyCode::PageUp => self.view.scroll_by(-PAGE_STEP),
                    KeyCode::PageDown => self.view.scroll_by(PAGE_STEP),
                    KeyCode::Home => self.view.scroll_to_top(),
                    KeyCode::End => self.view.scroll_to_bottom(),
                    KeyCode::Char('r') => self.refresh_page()?,
                    _ => {}
                }
                Ok(())
            }
            Page::Statistics => {
                if code == KeyCode::Char('r') {
                    self.refresh_page()?;
                }
                Ok(())
            }
        }
    }

    fn handle_add_key(&mut self, code: KeyCode) -> Result<()> {
        let form = &mut self.add.form;
        match code {
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_previous(),
            KeyCode::Up if form.active == BookField::Year => form.step_year(1),
            KeyCode::Down if form.active == BookField::Year => form.step_year(-1),
            KeyCode::Up => form.focus_previous(),
            KeyCode::Down => form.focus_next(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            KeyCode::Enter => return self.save_new_book(),
            _ => {}
        }
        Ok(())
    }

    fn handle_remove_key(&mut self, code: KeyCode) -> Result<()> {
        if self.remove.library_size == 0 {
            return Ok(());
        }
        match code {
            KeyCode::Char(ch) => {
                self.remove.input.push_char(ch);
            }
            KeyCode::Backspace => {
                self.remove.input.backspace();
            }
            KeyCode::Enter => return self.perform_remove(),
            _ => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, code: KeyCode) -> Result<()> {
        if self.search.library_size == 0 {
            return Ok(());
        }
        let changed = match code {
            KeyCode::Char(ch) => self.search.input.push_char(ch),
            KeyCode::Backspace => self.search.input.backspace(),
            _ => false,
        };
        if changed {
            self.refresh_search()?;
        }
        Ok(())
    }

    fn save_new_book(&mut self) -> Result<()> {
        let book = match self.add.form.parse_inputs() {
            Ok(book) => book,
            Err(err) => {
                let message = surface_error(&err);
                self.add.form.error = Some(message.clone());
                self.set_status(message, StatusKind::Warning);
                return Ok(());
            }
        };

        self.store
            .add(
                &book.title,
                &book.author,
                book.year,
                &book.genre,
                book.read_status,
            )
            .context("failed to add book")?;
        self.add.form = BookForm::default();
        self.set_status("Book added successfully!", StatusKind::Info);
        Ok(())
    }

    /// Remove by title and tell "removed" from "not found" by comparing the
    /// library size before and after.
    fn perform_remove(&mut self) -> Result<()> {
        let title = self.remove.input.trimmed().to_string();
        if title.is_empty() {
            self.set_status("Please enter a book title", StatusKind::Warning);
            return Ok(());
        }

        let initial_count = self
            .store
            .load_all()
            .context("failed to load library")?
            .len();
        let remaining = self.store.remove(&title).context("failed to remove book")?;
        self.remove.library_size = remaining;

        if remaining < initial_count {
            self.remove.input.clear();
            self.set_status(
                format!("Book '{title}' was removed successfully"),
                StatusKind::Info,
            );
        } else {
            self.set_status(
                format!("No book found with title '{title}'"),
                StatusKind::Warning,
            );
        }
        Ok(())
    }

    fn open_page(&mut self, page: Page) -> Result<()> {
        if self.page != page {
            self.clear_status();
        }
        self.page = page;
        self.refresh_page()
    }

    /// Re-read whatever the current page shows from the store.
    fn refresh_page(&mut self) -> Result<()> {
        match self.page {
            Page::AddBook => {}
            Page::RemoveBook => {
                self.remove.library_size = self
                    .store
                    .load_all()
                    .context("failed to load library")?
                    .len();
            }
            Page::SearchBooks => {
                self.search.library_size = self
                    .store
                    .load_all()
                    .context("failed to load library")?
                    .len();
                self.refresh_search()?;
            }
            Page::ViewBooks => {
                let books = self.store.all_books().context("failed to load library")?;
                self.view.set_books(books);
            }
            Page::Statistics => {
                self.stats.stats = self
                    .store
                    .statistics()
                    .context("failed to compute statistics")?;
            }
        }
        Ok(())
    }

    fn refresh_search(&mut self) -> Result<()> {
        if self.search.has_query() {
            self.search.results = self
                .store
                .search(self.search.input.trimmed())
                .context("failed to search library")?;
        } else {
            self.search.results.clear();
        }
        Ok(())
    }

    fn report_error(&mut self, err: Error) {
        error!("library operation failed: {err:#}");
        self.set_status(surface_error(&err), StatusKind::Error);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        let text = text.into();
        if matches!(kind, StatusKind::Info) {
            info!(page = self.page.menu_label(), "{text}");
        }
        self.status = Some(StatusMessage { text, kind });
    }

    fn clear_status(&mut self) {
        self.status = None;
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

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
            .split(content_area);

        self.draw_menu(frame, columns[0]);
        self.draw_page(frame, columns[1]);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn focus_style(&self, target: Focus) -> Style {
        if self.focus == target {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Page::ALL
            .iter()
            .map(|page| ListItem::new(format!("{} {}", page.index() + 1, page.menu_label())))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Library Menu")
                    .border_style(self.focus_style(Focus::Menu)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.page.index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_page(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.page.heading())
            .border_style(self.focus_style(Focus::Content));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.page {
            Page::AddBook => self.draw_add_page(frame, inner),
            Page::RemoveBook => self.draw_remove_page(frame, inner),
            Page::SearchBooks => self.draw_search_page(frame, inner),
            Page::ViewBooks => self.draw_view_page(frame, inner),
            Page::Statistics => self.draw_stats_page(frame, inner),
        }
    }

    fn draw_add_page(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Content;
        let form = &self.add.form;

        let mut lines: Vec<Line> = BookField::ALL
            .iter()
            .map(|field| form.build_line(*field, focused))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to add • Tab to switch • ↑↓ on the year to adjust • Space to toggle read",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);

        if focused {
            if let Some(column) = form.cursor_column() {
                frame.set_cursor_position((cursor_x(area, column), area.y + form.active.row()));
            }
        }
    }

    fn draw_remove_page(&self, frame: &mut Frame, area: Rect) {
        if self.remove.library_size == 0 {
            draw_notice(
                frame,
                area,
                "Your library is currently empty - no books to remove",
            );
            return;
        }

        let lines = vec![
            Line::from("Enter the exact book title to remove"),
            Line::from(format!("> {}", self.remove.input.value)),
        ];
        frame.render_widget(Paragraph::new(lines), area);

        if self.focus == Focus::Content {
            let column = self.remove.input.len().saturating_add(2);
            frame.set_cursor_position((cursor_x(area, column), area.y + 1));
        }
    }

    fn draw_search_page(&self, frame: &mut Frame, area: Rect) {
        if self.search.library_size == 0 {
            draw_notice(
                frame,
                area,
                "Your library is currently empty - no books to search",
            );
            return;
        }

        let mut lines = vec![
            Line::from("Search by book title or author name"),
            Line::from(format!("> {}", self.search.input.value)),
            Line::from(""),
        ];

        if self.search.has_query() {
            if self.search.results.is_empty() {
                lines.push(Line::from(Span::styled(
                    "No books found matching your search",
                    Style::default().fg(Color::Cyan),
                )));
            } else {
                lines.push(Line::from(format!(
                    "Found {} matching book(s):",
                    self.search.results.len()
                )));
                lines.push(Line::from(""));
                for book in &self.search.results {
                    lines.extend(book_entry_lines(book, None));
                }
            }
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);

        if self.focus == Focus::Content {
            let column = self.search.input.len().saturating_add(2);
            frame.set_cursor_position((cursor_x(area, column), area.y + 1));
        }
    }

    fn draw_view_page(&self, frame: &mut Frame, area: Rect) {
        if self.view.books.is_empty() {
            draw_notice(
                frame,
                area,
                "Your library is currently empty - add some books to get started!",
            );
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let header = Paragraph::new(format!(
            "You have {} book(s) in your collection:",
            self.view.books.len()
        ));
        frame.render_widget(header, chunks[0]);

        let lines: Vec<Line> = self
            .view
            .books
            .iter()
            .enumerate()
            .flat_map(|(idx, book)| book_entry_lines(book, Some(idx + 1)))
            .collect();
        let scroll = self.view.scroll.min(u16::MAX as usize) as u16;
        frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), chunks[1]);
    }

    fn draw_stats_page(&self, frame: &mut Frame, area: Rect) {
        if self.stats.stats.total == 0 {
            draw_notice(
                frame,
                area,
                "Your library is currently empty - no statistics to display",
            );
            return;
        }
        frame.render_widget(Paragraph::new(stats_lines(&self.stats.stats)), area);
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

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match (self.focus, self.page) {
            (Focus::Menu, _) => key_hints(&[
                ("[↑↓]", "Choose Page"),
                ("[1-5]", "Jump"),
                ("[Enter]", "Open"),
                ("[q]", "Quit"),
            ]),
            (Focus::Content, Page::AddBook) => key_hints(&[
                ("[Tab]", "Next Field"),
                ("[↑↓]", "Move/Year"),
                ("[Space]", "Toggle Read"),
                ("[Enter]", "Add Book"),
                ("[Esc]", "Menu"),
            ]),
            (Focus::Content, Page::RemoveBook) => {
                key_hints(&[("[Enter]", "Remove Book"), ("[Esc]", "Menu")])
            }
            (Focus::Content, Page::SearchBooks) => {
                key_hints(&[("[Type]", "Search"), ("[Esc]", "Menu")])
            }
            (Focus::Content, Page::ViewBooks) => key_hints(&[
                ("[↑↓]", "Scroll"),
                ("[PgUp/PgDn]", "Page"),
                ("[r]", "Reload"),
                ("[Esc]", "Menu"),
            ]),
            (Focus::Content, Page::Statistics) => {
                key_hints(&[("[r]", "Reload"), ("[Esc]", "Menu")])
            }
        }
    }
}

/// Screen x for a cursor `column` cells into `area`, pinned to the last column
/// once the text runs past it.
fn cursor_x(area: Rect, column: usize) -> u16 {
    let offset = u16::try_from(column).unwrap_or(u16::MAX);
    area.x
        .saturating_add(offset)
        .min(area.right().saturating_sub(1))
        .max(area.x)
}

/// Informational message shown when a page has nothing to work with.
fn draw_notice(frame: &mut Frame, area: Rect, text: &'static str) {
    let notice = Paragraph::new(Span::styled(text, Style::default().fg(Color::Cyan)))
        .wrap(Wrap { trim: true });
    frame.render_widget(notice, area);
}
