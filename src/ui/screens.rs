use std::cmp::min;

use crate::models::{Book, LibraryStats};

use super::forms::{BookForm, TextInput};

/// Pages listed in the sidebar menu. The selected value is the only
/// navigation state the application keeps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    AddBook,
    RemoveBook,
    SearchBooks,
    ViewBooks,
    Statistics,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::AddBook,
        Page::RemoveBook,
        Page::SearchBooks,
        Page::ViewBooks,
        Page::Statistics,
    ];

    /// Entry text in the sidebar menu.
    pub fn menu_label(self) -> &'static str {
        match self {
            Page::AddBook => "Add Book",
            Page::RemoveBook => "Remove Book",
            Page::SearchBooks => "Search Books",
            Page::ViewBooks => "View All Books",
            Page::Statistics => "Statistics",
        }
    }

    /// Heading shown above the page body.
    pub fn heading(self) -> &'static str {
        match self {
            Page::AddBook => "Add a New Book",
            Page::RemoveBook => "Remove a Book",
            Page::SearchBooks => "Search Books",
            Page::ViewBooks => "Your Book Collection",
            Page::Statistics => "Library Statistics",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Page::AddBook => 0,
            Page::RemoveBook => 1,
            Page::SearchBooks => 2,
            Page::ViewBooks => 3,
            Page::Statistics => 4,
        }
    }

    pub(crate) fn next(self) -> Self {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub(crate) fn previous(self) -> Self {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }

    /// Map the digit shortcuts `1`..`5` onto pages.
    pub(crate) fn from_shortcut(ch: char) -> Option<Self> {
        let digit = ch.to_digit(10)? as usize;
        digit
            .checked_sub(1)
            .and_then(|idx| Page::ALL.get(idx).copied())
    }
}

/// State behind the "Add Book" page.
#[derive(Default)]
pub(crate) struct AddScreen {
    pub(crate) form: BookForm,
}

/// State behind the "Remove Book" page.
#[derive(Default)]
pub(crate) struct RemoveScreen {
    pub(crate) input: TextInput,
    /// Library size seen on the last refresh; zero hides the input.
    pub(crate) library_size: usize,
}

/// State behind the "Search Books" page.
#[derive(Default)]
pub(crate) struct SearchScreen {
    pub(crate) input: TextInput,
    pub(crate) library_size: usize,
    /// Results for the current query. Empty while the query is blank.
    pub(crate) results: Vec<Book>,
}

impl SearchScreen {
    /// Whether a non-blank query is active, i.e. whether results are shown.
    pub(crate) fn has_query(&self) -> bool {
        !self.input.trimmed().is_empty()
    }
}

/// Scrollable listing behind the "View All Books" page.
#[derive(Default)]
pub(crate) struct ViewScreen {
    pub(crate) books: Vec<Book>,
    /// First visible line of the rendered listing.
    pub(crate) scroll: usize,
    /// Total number of rendered lines, kept in sync by `set_books`.
    line_count: usize,
}

impl ViewScreen {
    /// Lines each book occupies in the listing (title, byline, details, gap).
    pub(crate) const LINES_PER_BOOK: usize = 4;

    pub(crate) fn set_books(&mut self, books: Vec<Book>) {
        self.line_count = books.len() * Self::LINES_PER_BOOK;
        self.books = books;
        self.ensure_in_bounds();
    }

    pub(crate) fn scroll_by(&mut self, offset: isize) {
        let max = self.max_scroll() as isize;
        let next = (self.scroll as isize + offset).clamp(0, max);
        self.scroll = next as usize;
    }

    pub(crate) fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub(crate) fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn max_scroll(&self) -> usize {
        self.line_count.saturating_sub(1)
    }

    fn ensure_in_bounds(&mut self) {
        self.scroll = min(self.scroll, self.max_scroll());
    }
}

/// Figures behind the "Statistics" page.
#[derive(Default)]
pub(crate) struct StatsScreen {
    pub(crate) stats: LibraryStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_wrap_in_both_directions() {
        assert_eq!(Page::Statistics.next(), Page::AddBook);
        assert_eq!(Page::AddBook.previous(), Page::Statistics);
        assert_eq!(Page::RemoveBook.next(), Page::SearchBooks);
    }

    #[test]
    fn digit_shortcuts() {
        assert_eq!(Page::from_shortcut('1'), Some(Page::AddBook));
        assert_eq!(Page::from_shortcut('5'), Some(Page::Statistics));
        assert_eq!(Page::from_shortcut('0'), None);
        assert_eq!(Page::from_shortcut('6'), None);
        assert_eq!(Page::from_shortcut('a'), None);
    }

    #[test]
    fn view_scroll_is_clamped() {
        let mut view = ViewScreen::default();
        view.set_books(vec![
            Book::new("Dune", "Herbert", 1965, "Sci-Fi", true),
            Book::new("Emma", "Austen", 1815, "Romance", false),
        ]);
        view.scroll_by(-3);
        assert_eq!(view.scroll, 0);
        view.scroll_by(100);
        assert_eq!(view.scroll, 2 * ViewScreen::LINES_PER_BOOK - 1);

        view.set_books(Vec::new());
        assert_eq!(view.scroll, 0);
    }
}
