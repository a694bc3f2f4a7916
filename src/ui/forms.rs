use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::DEFAULT_GENRE;

/// Earliest publication year the form accepts.
pub(crate) const MIN_YEAR: i32 = 1800;
/// Latest publication year the form accepts.
pub(crate) const MAX_YEAR: i32 = 2025;
/// Year pre-filled in a fresh form.
pub(crate) const DEFAULT_YEAR: i32 = 2023;

/// Fields available within the add-book form, in tab order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
    Genre,
    Read,
}

impl BookField {
    pub(crate) const ALL: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Genre,
        BookField::Read,
    ];

    pub(crate) fn next(self) -> Self {
        match self {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Year,
            BookField::Year => BookField::Genre,
            BookField::Genre => BookField::Read,
            BookField::Read => BookField::Title,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            BookField::Title => BookField::Read,
            BookField::Author => BookField::Title,
            BookField::Year => BookField::Author,
            BookField::Genre => BookField::Year,
            BookField::Read => BookField::Genre,
        }
    }

    /// Label rendered in front of the value. Required fields carry a `*`.
    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title*",
            BookField::Author => "Author*",
            BookField::Year => "Publication Year*",
            BookField::Genre => "Genre",
            BookField::Read => "I've read this book",
        }
    }

    /// Row of the field inside the form body.
    pub(crate) fn row(self) -> u16 {
        match self {
            BookField::Title => 0,
            BookField::Author => 1,
            BookField::Year => 2,
            BookField::Genre => 3,
            BookField::Read => 4,
        }
    }
}

/// Validated form contents, ready to hand to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewBook {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: i32,
    pub(crate) genre: String,
    pub(crate) read_status: bool,
}

/// Internal representation of the add-book form.
#[derive(Clone, Debug)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) genre: String,
    pub(crate) read: bool,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

impl Default for BookForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            year: DEFAULT_YEAR.to_string(),
            genre: DEFAULT_GENRE.to_string(),
            read: false,
            active: BookField::Title,
            error: None,
        }
    }
}

impl BookForm {
    pub(crate) fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    /// Append a character to the active field, validating allowed input. On
    /// the checkbox a space toggles instead.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::Title => self.title.push(ch),
            BookField::Author => self.author.push(ch),
            BookField::Genre => self.genre.push(ch),
            BookField::Year => {
                if !ch.is_ascii_digit() || self.year.len() >= 4 {
                    return false;
                }
                self.year.push(ch);
            }
            BookField::Read => {
                if ch != ' ' {
                    return false;
                }
                self.read = !self.read;
            }
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Year => {
                self.year.pop();
            }
            BookField::Genre => {
                self.genre.pop();
            }
            BookField::Read => {}
        }
    }

    /// Nudge the year by `delta`, clamped to the accepted range. A blank or
    /// unreadable year restarts from the default.
    pub(crate) fn step_year(&mut self, delta: i32) {
        let current = self.year.trim().parse::<i32>().unwrap_or(DEFAULT_YEAR);
        let next = current.saturating_add(delta).clamp(MIN_YEAR, MAX_YEAR);
        self.year = next.to_string();
    }

    /// Validate the inputs and return trimmed values ready for persistence.
    pub(crate) fn parse_inputs(&self) -> Result<NewBook> {
        let title = self.title.trim();
        let author = self.author.trim();
        if title.is_empty() || author.is_empty() {
            return Err(anyhow!("Please fill in all required fields (marked with *)"));
        }

        let year_raw = self.year.trim();
        if year_raw.is_empty() {
            return Err(anyhow!("Publication year is required."));
        }
        let year = year_raw
            .parse::<i32>()
            .map_err(|_| anyhow!("Publication year must be a whole number."))?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(anyhow!(
                "Publication year must be between {MIN_YEAR} and {MAX_YEAR}."
            ));
        }

        let genre = match self.genre.trim() {
            "" => DEFAULT_GENRE,
            genre => genre,
        };

        Ok(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            year,
            genre: genre.to_string(),
            read_status: self.read,
        })
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: BookField, focused: bool) -> Line<'static> {
        let is_active = focused && self.active == field;
        let (display, empty) = match field {
            BookField::Read => {
                let mark = if self.read { "[x]" } else { "[ ]" };
                (mark.to_string(), false)
            }
            _ => {
                let value = self.value(field);
                if value.is_empty() {
                    ("<required>".to_string(), true)
                } else {
                    (value.to_string(), false)
                }
            }
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if empty {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Column offset of the cursor for the active text field, or `None` on
    /// the checkbox.
    pub(crate) fn cursor_column(&self) -> Option<usize> {
        if self.active == BookField::Read {
            return None;
        }
        let prefix = self.active.label().chars().count() + 2;
        Some(prefix + self.value(self.active).chars().count())
    }

    fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Year => &self.year,
            BookField::Genre => &self.genre,
            BookField::Read => "",
        }
    }
}

/// Single-line text input used by the remove and search pages.
#[derive(Clone, Debug, Default)]
pub(crate) struct TextInput {
    pub(crate) value: String,
}

impl TextInput {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) -> bool {
        self.value.pop().is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.value.clear();
    }

    pub(crate) fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub(crate) fn len(&self) -> usize {
        self.value.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> BookForm {
        BookForm {
            title: "  Dune ".to_string(),
            author: "Herbert  ".to_string(),
            year: "1965".to_string(),
            genre: " Sci-Fi".to_string(),
            read: true,
            ..BookForm::default()
        }
    }

    #[test]
    fn fresh_form_has_defaults() {
        let form = BookForm::default();
        assert_eq!(form.year, "2023");
        assert_eq!(form.genre, "General");
        assert!(!form.read);
        assert_eq!(form.active, BookField::Title);
    }

    #[test]
    fn parse_trims_values() {
        let book = filled_form().parse_inputs().unwrap();
        assert_eq!(
            book,
            NewBook {
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                year: 1965,
                genre: "Sci-Fi".to_string(),
                read_status: true,
            }
        );
    }

    #[test]
    fn blank_title_or_author_is_rejected() {
        let mut form = filled_form();
        form.title = "   ".to_string();
        let err = form.parse_inputs().unwrap_err();
        assert!(err.to_string().contains("required fields"));

        let mut form = filled_form();
        form.author.clear();
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn year_outside_range_is_rejected() {
        let mut form = filled_form();
        form.year = "1799".to_string();
        assert!(form.parse_inputs().is_err());
        form.year = "2026".to_string();
        assert!(form.parse_inputs().is_err());
        form.year = "1800".to_string();
        assert!(form.parse_inputs().is_ok());
    }

    #[test]
    fn blank_genre_becomes_general() {
        let mut form = filled_form();
        form.genre = "  ".to_string();
        assert_eq!(form.parse_inputs().unwrap().genre, "General");
    }

    #[test]
    fn year_field_only_takes_four_digits() {
        let mut form = BookForm::default();
        form.active = BookField::Year;
        form.year.clear();
        assert!(!form.push_char('x'));
        for ch in "19651".chars() {
            form.push_char(ch);
        }
        assert_eq!(form.year, "1965");
    }

    #[test]
    fn step_year_clamps() {
        let mut form = BookForm::default();
        form.year = "2025".to_string();
        form.step_year(1);
        assert_eq!(form.year, "2025");
        form.year = "1800".to_string();
        form.step_year(-1);
        assert_eq!(form.year, "1800");
        form.year.clear();
        form.step_year(1);
        assert_eq!(form.year, "2024");
    }

    #[test]
    fn space_toggles_checkbox() {
        let mut form = BookForm::default();
        form.active = BookField::Read;
        assert!(form.push_char(' '));
        assert!(form.read);
        assert!(!form.push_char('x'));
        assert!(form.read);
        assert_eq!(form.cursor_column(), None);
    }

    #[test]
    fn focus_cycles_through_every_field() {
        let mut form = BookForm::default();
        for expected in BookField::ALL.iter().skip(1) {
            form.focus_next();
            assert_eq!(form.active, *expected);
        }
        form.focus_next();
        assert_eq!(form.active, BookField::Title);
        form.focus_previous();
        assert_eq!(form.active, BookField::Read);
    }

    #[test]
    fn cursor_follows_label_and_value() {
        let mut form = BookForm::default();
        form.title = "Dune".to_string();
        assert_eq!(form.cursor_column(), Some("Title*: Dune".len()));
    }
}
