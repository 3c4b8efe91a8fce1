use bookshelf_core::{Book, Genre, LibraryStats, NewBook};

#[test]
fn book_serializes_genre_as_label() {
    let book = Book {
        id: 7,
        title: "Coraline".to_string(),
        author: "Neil Gaiman".to_string(),
        year: 2002,
        genre: Genre::DarkFantasy,
        read: false,
    };

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["genre"], "Dark fantasy");
    assert_eq!(json["read"], false);
    assert_eq!(json["id"], 7);

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn new_book_rejects_unknown_genre_label_in_json() {
    let result = serde_json::from_str::<NewBook>(
        r#"{"title":"X","author":"Y","year":1990,"genre":"Poetry","read":false}"#,
    );
    assert!(result.is_err());
}

#[test]
fn genre_set_matches_catalog_order() {
    let labels: Vec<&str> = Genre::ALL.iter().map(|genre| genre.label()).collect();
    assert_eq!(labels.first(), Some(&"Fantasy"));
    assert_eq!(labels.last(), Some(&"Graphic novel"));
    assert!(labels.contains(&"Children's literature"));
    assert_eq!(labels.len(), 23);
}

#[test]
fn stats_serialize_with_raw_percentage() {
    let json = serde_json::to_value(LibraryStats::new(4, 1)).unwrap();
    assert_eq!(json["total"], 4);
    assert_eq!(json["percent_read"], 25.0);
}
