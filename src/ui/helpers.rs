use anyhow::Error;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{Book, LibraryStats};

/// Lines describing one book: title, byline, then genre and read status.
/// `position` prefixes the title with a 1-based number when given. A blank
/// line closes the entry.
pub(crate) fn book_entry_lines(book: &Book, position: Option<usize>) -> Vec<Line<'static>> {
    let title = match position {
        Some(number) => format!("{number}. {}", book.title),
        None => book.title.clone(),
    };
    let status_style = if book.read_status {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    vec![
        Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("   {}", book.byline()),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(vec![
            Span::raw(format!("   Genre: {} | Status: ", book.genre)),
            Span::styled(book.status_label(), status_style),
        ]),
        Line::from(""),
    ]
}

/// Body of the statistics page.
pub(crate) fn stats_lines(stats: &LibraryStats) -> Vec<Line<'static>> {
    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Total Books: ", label_style),
            Span::raw(stats.total.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Read Percentage: ", label_style),
            Span::raw(format!("{:.1}%", stats.read_percentage)),
        ]),
    ];

    if !stats.genre_counts.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Books by Genre", label_style)));
        for (genre, count) in &stats.genre_counts {
            lines.push(Line::from(vec![
                Span::raw("- "),
                Span::styled(genre.clone(), label_style),
                Span::raw(format!(": {count} book(s)")),
            ]));
        }
    }

    lines
}

/// Footer hint line built from `(key, action)` pairs.
pub(crate) fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (idx, (key, action)) in hints.iter().enumerate() {
        spans.push(Span::styled(*key, key_style));
        if idx + 1 == hints.len() {
            spans.push(Span::raw(format!(" {action}")));
        } else {
            spans.push(Span::raw(format!(" {action}   ")));
        }
    }
    Line::from(spans)
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn entry_lines_number_the_title() {
        let book = Book::new("Dune", "Herbert", 1965, "Sci-Fi", true);
        let lines = book_entry_lines(&book, Some(3));
        assert_eq!(plain(&lines[0]), "3. Dune");
        assert_eq!(plain(&lines[1]), "   by Herbert (1965)");
        assert_eq!(plain(&lines[2]), "   Genre: Sci-Fi | Status: ✓ Read");
    }

    #[test]
    fn stats_lines_format_percentage() {
        let books = vec![
            Book::new("Dune", "Herbert", 1965, "Sci-Fi", true),
            Book::new("Emma", "Austen", 1815, "Romance", false),
            Book::new("Persuasion", "Austen", 1817, "Romance", false),
        ];
        let lines = stats_lines(&LibraryStats::from_books(&books));
        let text: Vec<String> = lines.iter().map(plain).collect();
        assert!(text.contains(&"Read Percentage: 33.3%".to_string()));
        assert!(text.contains(&"- Romance: 2 book(s)".to_string()));
    }

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = anyhow!("disk full").context("failed to save library");
        assert_eq!(surface_error(&err), "disk full");
    }
}
