use std::fs;

use library_tracker::{Book, BookStore};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> BookStore {
    BookStore::new(dir.path().join("books_data.json"))
}

#[test]
fn dune_and_emma_walkthrough() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.add("Dune", "Herbert", 1965, "Sci-Fi", true).unwrap();
    store.add("Emma", "Austen", 1815, "Romance", false).unwrap();

    let dune = Book::new("Dune", "Herbert", 1965, "Sci-Fi", true);
    let emma = Book::new("Emma", "Austen", 1815, "Romance", false);
    assert_eq!(store.load_all().unwrap(), vec![dune.clone(), emma.clone()]);

    assert_eq!(store.search("e").unwrap(), vec![dune, emma.clone()]);

    let stats = store.statistics().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.read_percentage, 50.0);
    assert_eq!(stats.genre_counts.len(), 2);
    assert_eq!(stats.genre_counts["Sci-Fi"], 1);
    assert_eq!(stats.genre_counts["Romance"], 1);

    assert_eq!(store.remove("dune").unwrap(), 1);
    assert_eq!(store.load_all().unwrap(), vec![emma]);
}

#[test]
fn persisted_layout_is_a_plain_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.add("Dune", "Herbert", 1965, "Sci-Fi", true).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "title": "Dune",
            "author": "Herbert",
            "year": 1965,
            "genre": "Sci-Fi",
            "read_status": true
        }])
    );
}

#[test]
fn reads_documents_written_by_hand() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(
        store.path(),
        r#"[{"title":"Emma","author":"Austen","year":1815,"genre":"Romance","read_status":false}]"#,
    )
    .unwrap();

    let books = store.load_all().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].author, "Austen");
}

#[test]
fn corrupt_document_is_replaced_on_next_write() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "[{\"title\": ").unwrap();

    assert!(store.load_all().unwrap().is_empty());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "[{\"title\": ");

    store.add("Dune", "Herbert", 1965, "Sci-Fi", true).unwrap();
    assert_eq!(store.load_all().unwrap().len(), 1);
}

#[test]
fn non_integer_years_survive_a_write() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(
        store.path(),
        r#"[{"title":"Dune","author":"Herbert","year":1965.0,"genre":"Sci-Fi","read_status":true},
            {"title":"Emma","author":"Austen","year":1815,"genre":"Romance","read_status":false},
            {"title":"Far","author":"Future","year":99999999999,"genre":"Sci-Fi","read_status":false}]"#,
    )
    .unwrap();

    assert_eq!(store.load_all().unwrap().len(), 3);
    store
        .add("Neuromancer", "Gibson", 1984, "Sci-Fi", true)
        .unwrap();

    let titles: Vec<String> = store
        .load_all()
        .unwrap()
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(titles, ["Dune", "Emma", "Far", "Neuromancer"]);

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw[0]["year"], serde_json::json!(1965.0));
    assert_eq!(raw[2]["year"], serde_json::json!(99_999_999_999u64));
}

#[test]
fn array_of_foreign_objects_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), r#"[{"name":"not a book"}]"#).unwrap();
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn every_store_sees_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let writer = store_in(&dir);
    let reader = store_in(&dir);

    writer.add("Dune", "Herbert", 1965, "Sci-Fi", true).unwrap();
    assert_eq!(reader.load_all().unwrap().len(), 1);
    assert_eq!(reader.remove("DUNE").unwrap(), 0);
    assert!(writer.all_books().unwrap().is_empty());
}
