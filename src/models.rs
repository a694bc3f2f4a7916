//! Domain models that mirror the JSON document on disk and get passed
//! throughout the TUI. These types stay light-weight data holders so the store
//! and the pages can focus on persistence and presentation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Genre assigned when the user leaves the field alone. Records written before
/// the genre field existed also fall back to it on load, so older files keep
/// reading cleanly.
pub const DEFAULT_GENRE: &str = "General";

fn default_genre() -> String {
    DEFAULT_GENRE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One entry in the library. Field names match the persisted layout exactly,
/// so the struct serializes straight into the array stored on disk and a file
/// edited by hand reads back without a translation layer.
pub struct Book {
    /// Title shown in lists. There is no record id, so the title doubles as
    /// the natural key: removal and search compare it case-insensitively.
    pub title: String,
    /// Author name, matched alongside the title when searching.
    pub author: String,
    /// Publication year, kept as whatever JSON number the file holds. A record
    /// with `1965.0` or an out-of-range value must still load; otherwise the
    /// whole document would read as empty and the next save would wipe every
    /// other book. The form keeps new entries within 1800..=2025.
    pub year: Number,
    /// Free-text genre used to group the statistics page.
    #[serde(default = "default_genre")]
    pub genre: String,
    /// Whether the reader has finished the book; drives the read percentage.
    pub read_status: bool,
}

impl Book {
    /// Build a record from already validated form input. The year arrives as
    /// an integer because that is all the form produces.
    pub fn new(title: &str, author: &str, year: i32, genre: &str, read_status: bool) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            year: Number::from(year),
            genre: genre.to_string(),
            read_status,
        }
    }

    /// Short read marker used by every listing. Keeping it on the model means
    /// the search results and the collection view never drift apart.
    pub fn status_label(&self) -> &'static str {
        if self.read_status {
            "✓ Read"
        } else {
            "✗ Unread"
        }
    }

    /// `by Author (Year)` line rendered under the title.
    pub fn byline(&self) -> String {
        format!("by {} ({})", self.author, self.year)
    }

    /// Whether `title` names this book, ignoring case. This is the identity
    /// rule removal relies on, so duplicates differing only in case go together.
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Whether the lowercased `needle` appears in the title or the author.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Aggregate figures for the statistics page. Computed from a fresh load each
/// time so the page never shows numbers from a stale snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryStats {
    /// Number of records, duplicates included.
    pub total: usize,
    /// Share of read books in percent. An empty library reports `0.0` rather
    /// than dividing by zero.
    pub read_percentage: f64,
    /// Books per genre, keyed by the exact genre text. A sorted map keeps the
    /// listing stable between refreshes.
    pub genre_counts: BTreeMap<String, usize>,
}

impl LibraryStats {
    /// Fold a library into its statistics.
    pub fn from_books(books: &[Book]) -> Self {
        let total = books.len();
        let read = books.iter().filter(|book| book.read_status).count();
        let read_percentage = if total > 0 {
            read as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        let mut genre_counts = BTreeMap::new();
        for book in books {
            *genre_counts.entry(book.genre.clone()).or_insert(0) += 1;
        }

        Self {
            total,
            read_percentage,
            genre_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_genre_falls_back_to_general() {
        let raw = r#"{"title":"Dune","author":"Herbert","year":1965,"read_status":true}"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        assert_eq!(book.genre, DEFAULT_GENRE);
    }

    #[test]
    fn fractional_year_is_kept_verbatim() {
        let raw = r#"{"title":"Dune","author":"Herbert","year":1965.0,"genre":"Sci-Fi","read_status":true}"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        assert_eq!(book.byline(), "by Herbert (1965.0)");
        assert_eq!(serde_json::to_value(&book).unwrap()["year"], serde_json::json!(1965.0));
    }

    #[test]
    fn year_beyond_i32_loads() {
        let raw = r#"{"title":"Far","author":"Future","year":99999999999,"genre":"Sci-Fi","read_status":false}"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        assert_eq!(book.year.as_i64(), Some(99_999_999_999));
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let book = Book::new("Emma", "Austen", 1815, "Romance", false);
        let value = serde_json::to_value(&book).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["author", "genre", "read_status", "title", "year"]);
    }

    #[test]
    fn title_identity_ignores_case() {
        let book = Book::new("Dune", "Herbert", 1965, "Sci-Fi", true);
        assert!(book.has_title("dUNE"));
        assert!(!book.has_title("Dune Messiah"));
    }

    #[test]
    fn labels_and_byline() {
        let book = Book::new("Dune", "Herbert", 1965, "Sci-Fi", true);
        assert_eq!(book.status_label(), "✓ Read");
        assert_eq!(book.byline(), "by Herbert (1965)");
        assert_eq!(book.to_string(), "Dune");
    }

    #[test]
    fn stats_for_empty_library() {
        let stats = LibraryStats::from_books(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.read_percentage, 0.0);
        assert!(stats.genre_counts.is_empty());
    }

    #[test]
    fn stats_count_read_share_and_genres() {
        let books = vec![
            Book::new("A", "x", 2000, "Poetry", true),
            Book::new("B", "x", 2000, "Poetry", true),
            Book::new("C", "x", 2000, "Drama", true),
            Book::new("D", "x", 2000, "Drama", false),
        ];
        let stats = LibraryStats::from_books(&books);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.read_percentage, 75.0);
        assert_eq!(stats.genre_counts.get("Poetry"), Some(&2));
        assert_eq!(stats.genre_counts.get("Drama"), Some(&2));
    }
}
