use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::Result;
use super::file::{ensure_initialized, read_books, write_books};
use crate::models::{Book, LibraryStats};

/// Handle on the JSON library file. The store holds no books itself: every
/// call loads the document fresh and mutations write it back in full. Keeping
/// no cache means an edit made by hand, or by a second window, shows up on the
/// very next page refresh instead of being overwritten by a stale copy.
#[derive(Debug, Clone)]
pub struct BookStore {
    path: PathBuf,
}

impl BookStore {
    /// Bind a store to `path`. Nothing touches the disk until the first
    /// operation, so constructing a store is free and cannot fail.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data file with an empty list when it is missing or blank.
    /// Safe to call any number of times. `main` runs it once at startup so a
    /// missing home directory fails loudly before the terminal is taken over,
    /// and every load repeats it in case the file was deleted mid-session.
    pub fn ensure_initialized(&self) -> Result<()> {
        ensure_initialized(&self.path)
    }

    /// Load every book in insertion order. A corrupt document reads as an
    /// empty library so the UI always has something to render; the discarded
    /// parse error goes to the log. Only failures of the file system itself
    /// are returned, because those need the user's attention.
    pub fn load_all(&self) -> Result<Vec<Book>> {
        self.ensure_initialized()?;
        let books = read_books(&self.path)?;
        debug!(count = books.len(), "loaded library");
        Ok(books)
    }

    /// Same as [`BookStore::load_all`]; reads better at the "view all" call site.
    pub fn all_books(&self) -> Result<Vec<Book>> {
        self.load_all()
    }

    /// Overwrite the whole document with `books`. The write is staged and
    /// renamed into place, so an interrupted save leaves the previous library
    /// intact rather than a truncated file.
    pub fn save_all(&self, books: &[Book]) -> Result<()> {
        write_books(&self.path, books)?;
        debug!(count = books.len(), "saved library");
        Ok(())
    }

    /// Append a book and persist the library. Input is stored as given;
    /// callers validate before getting here, which keeps the store usable for
    /// imports that carry years outside the form's range. Returns the stored
    /// record so the caller can report it without a second load.
    pub fn add(
        &self,
        title: &str,
        author: &str,
        year: i32,
        genre: &str,
        read_status: bool,
    ) -> Result<Book> {
        let mut books = self.load_all()?;
        let book = Book::new(title, author, year, genre, read_status);
        books.push(book.clone());
        self.save_all(&books)?;
        info!(title = %book.title, author = %book.author, "added book");
        Ok(book)
    }

    /// Drop every book whose title matches `title` ignoring case and return
    /// how many books remain. Titles are the only handle a record has, so all
    /// case-insensitive duplicates go together. Callers detect "not found" by
    /// comparing this with the count they saw before; the file is rewritten
    /// either way.
    pub fn remove(&self, title: &str) -> Result<usize> {
        let books = self.load_all()?;
        let before = books.len();
        let remaining: Vec<Book> = books
            .into_iter()
            .filter(|book| !book.has_title(title))
            .collect();
        self.save_all(&remaining)?;
        info!(
            title,
            removed = before - remaining.len(),
            remaining = remaining.len(),
            "removed books by title"
        );
        Ok(remaining.len())
    }

    /// Books whose title or author contains `query`, ignoring case, in
    /// library order. An empty query returns everything, which is what a
    /// substring match against "" naturally gives; the search page hides
    /// results until something is typed.
    pub fn search(&self, query: &str) -> Result<Vec<Book>> {
        let needle = query.to_lowercase();
        let matches: Vec<Book> = self
            .load_all()?
            .into_iter()
            .filter(|book| book.matches_lowercase(&needle))
            .collect();
        debug!(query, hits = matches.len(), "searched library");
        Ok(matches)
    }

    /// Total count, read percentage and per-genre counts, derived from a fresh
    /// load so the statistics page agrees with the collection view.
    pub fn statistics(&self) -> Result<LibraryStats> {
        let books = self.load_all()?;
        Ok(LibraryStats::from_books(&books))
    }
}
