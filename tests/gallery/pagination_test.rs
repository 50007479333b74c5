use gallery::gallery::{display_path, file_name, Pagination};

#[test]
fn test_walk_through_pages() {
    let mut p = Pagination::new(1, 24, 50);
    assert_eq!(p.total_pages(), 3);
    assert!(!p.has_previous());

    let mut spans = vec![p.row_span().unwrap()];
    while p.has_next() {
        p.next();
        spans.push(p.row_span().unwrap());
    }

    assert_eq!(spans, vec![(1, 24), (25, 48), (49, 50)]);
    assert_eq!(p.page(), 3);

    // next past the end stays put
    p.next();
    assert_eq!(p.page(), 3);
}

#[test]
fn test_empty_result_is_one_page() {
    let p = Pagination::new(4, 12, 0);
    assert_eq!(p.total_pages(), 1);
    assert_eq!(p.page(), 1);
    assert_eq!(p.offset(), 0);
    assert_eq!(p.row_span(), None);
    assert!(!p.has_next());
    assert!(!p.has_previous());
}

#[test]
fn test_page_requests_are_clamped() {
    assert_eq!(Pagination::new(0, 24, 100).page(), 1);
    assert_eq!(Pagination::new(99, 24, 100).page(), 5);

    let mut p = Pagination::new(2, 24, 100);
    p.go_to(0);
    assert_eq!(p.page(), 1);
    p.previous();
    assert_eq!(p.page(), 1);
}

#[test]
fn test_narrowing_filters_pulls_page_back() {
    let mut p = Pagination::new(5, 24, 100);
    assert_eq!(p.offset(), 96);

    p.set_total(30);
    assert_eq!(p.page(), 2);
    assert_eq!(p.row_span(), Some((25, 30)));
}

#[test]
fn test_changing_page_size_restarts() {
    let mut p = Pagination::new(3, 12, 100);
    p.set_per_page(48);
    assert_eq!(p.page(), 1);
    assert_eq!(p.total_pages(), 3);
}

#[test]
fn test_zero_page_size_is_one() {
    let p = Pagination::new(1, 0, 3);
    assert_eq!(p.per_page(), 1);
    assert_eq!(p.total_pages(), 3);
}

#[test]
fn test_exact_multiple_has_no_trailing_page() {
    let p = Pagination::new(4, 12, 48);
    assert_eq!(p.total_pages(), 4);
    assert!(!p.has_next());
    assert_eq!(p.row_span(), Some((37, 48)));
}

#[test]
fn test_display_path() {
    assert_eq!(
        display_path("dbfs:/Volumes/a/b/c/cat.png"),
        "/Volumes/a/b/c/cat.png"
    );
    assert_eq!(display_path("/Volumes/a/b/c/cat.png"), "/Volumes/a/b/c/cat.png");
    assert_eq!(display_path("dbfs:/tmp/cat.png"), "dbfs:/tmp/cat.png");
    assert_eq!(display_path("cat.png"), "cat.png");
}

#[test]
fn test_file_name() {
    assert_eq!(file_name("/Volumes/a/b/c/cat.png"), "cat.png");
    assert_eq!(file_name("cat.png"), "cat.png");
    assert_eq!(file_name("/Volumes/a/"), "");
}
