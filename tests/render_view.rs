use booklog::{
    book::{HistoryEntry, PLACEHOLDER_IMAGE, seed_catalog},
    types::{ALL_CATEGORIES, HistoryAction},
    view::{
        CatalogView, HistoryView,
        render::{NO_BOOKS_MESSAGE, NO_HISTORY_MESSAGE, render_catalog, render_history},
    },
};

fn titles(view: &CatalogView) -> Vec<&str> {
    view.cards().iter().map(|c| c.title.as_str()).collect()
}

#[test]
fn query_matches_title_or_author_ignoring_case() {
    let books = seed_catalog();

    assert_eq!(titles(&render_catalog(&books, "CLEAN", ALL_CATEGORIES)), vec!["Clean Code"]);
    assert_eq!(titles(&render_catalog(&books, "orwell", ALL_CATEGORIES)), vec!["1984"]);
    assert_eq!(
        titles(&render_catalog(&books, "  the  ", ALL_CATEGORIES)),
        vec!["The Pragmatic Programmer"]
    );
}

#[test]
fn query_and_category_must_both_match() {
    let books = seed_catalog();

    assert_eq!(
        titles(&render_catalog(&books, "", "Programming")),
        vec!["The Pragmatic Programmer", "Clean Code"]
    );
    assert_eq!(titles(&render_catalog(&books, "clean", "Programming")), vec!["Clean Code"]);
    assert_eq!(
        render_catalog(&books, "clean", "Fiction"),
        CatalogView::Empty { message: NO_BOOKS_MESSAGE }
    );
    assert_eq!(
        render_catalog(&books, "", "programming"),
        CatalogView::Empty { message: NO_BOOKS_MESSAGE }
    );
}

#[test]
fn cards_carry_status_badge_and_action() {
    let books = seed_catalog();
    let view = render_catalog(&books, "", ALL_CATEGORIES);
    let cards = view.cards();

    assert_eq!(cards.len(), 4);
    assert_eq!(cards[0].status.label, "Available");
    assert_eq!(cards[0].status.class, "available");
    assert_eq!(cards[0].action, "Borrow");
    assert_eq!(cards[2].status.label, "Borrowed");
    assert_eq!(cards[2].status.class, "borrowed");
    assert_eq!(cards[2].action, "Return");
    assert_eq!(cards[2].id, 3);
    assert!(cards.iter().all(|c| c.fallback_image == PLACEHOLDER_IMAGE));
    assert_eq!(cards[3].image, "https://m.media-amazon.com/images/I/71kxa1-0mfL.jpg");
}

#[test]
fn empty_catalog_renders_placeholder() {
    assert_eq!(
        render_catalog(&[], "", ALL_CATEGORIES),
        CatalogView::Empty { message: NO_BOOKS_MESSAGE }
    );
}

#[test]
fn history_lines_keep_stored_order() {
    let history = vec![
        HistoryEntry {
            action: HistoryAction::Returned,
            title: "Dune".to_string(),
            date: "10/19/2026, 2:06:00 PM".to_string(),
        },
        HistoryEntry {
            action: HistoryAction::Borrowed,
            title: "Dune".to_string(),
            date: "10/19/2026, 2:05:00 PM".to_string(),
        },
    ];

    assert_eq!(
        render_history(&history),
        HistoryView::Lines(vec![
            "10/19/2026, 2:06:00 PM → Returned: Dune".to_string(),
            "10/19/2026, 2:05:00 PM → Borrowed: Dune".to_string(),
        ])
    );
}

#[test]
fn empty_history_renders_placeholder() {
    let view = render_history(&[]);
    assert_eq!(view, HistoryView::Empty { message: NO_HISTORY_MESSAGE });
    assert!(view.lines().is_empty());
}

#[test]
fn rendering_does_not_touch_input() {
    let books = seed_catalog();
    let before = books.clone();
    let _ = render_catalog(&books, "code", "Programming");
    assert_eq!(books, before);
}
