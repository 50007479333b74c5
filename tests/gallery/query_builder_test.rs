//! Listing statements built from settings, checked against a Postgres parser.

use gallery::config::Settings;
use gallery::gallery::{
    count_query, distinct_label_details_query, distinct_labels_query, list_all_paths_query,
    list_paths_query, score_range_query, ImageFilter, TableLayout,
};
use gallery::schema::{find_table_schema_query, table_exists_query};
use gallery::sql::{BoundQuery, SqlValue};
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

fn assert_parses(query: &BoundQuery) {
    if let Err(e) = Parser::parse_sql(&PostgreSqlDialect {}, &query.sql) {
        panic!("invalid SQL: {}\n{}", e, query.sql);
    }
}

fn placeholder_count(sql: &str) -> usize {
    (1..=32).filter(|n| sql.contains(&format!("${}", n))).count()
}

fn custom_layout() -> TableLayout {
    let settings = Settings::from_toml(
        r#"
[table]
schema = "vision"
name = "Predictions"
path_column = "file_path"
label_column = "class"
label_detail_column = "subClass"
score_column = "confidence"
"#,
    )
    .unwrap();
    TableLayout::from_settings(&settings.table, &settings.table.schema)
}

#[test]
fn test_custom_columns_flow_into_listing() {
    let filter = ImageFilter::new().label("vehicle").min_score(0.6);
    let q = list_paths_query(&custom_layout(), &filter, 24, 48);

    insta::assert_snapshot!(q.sql, @r#"
    SELECT
      "file_path"
    FROM "vision"."Predictions"
    WHERE "class" = $1 AND "confidence" >= $2
    ORDER BY "file_path"
    LIMIT $3 OFFSET $4
    "#);
    assert_eq!(
        q.params,
        vec![
            SqlValue::Text("vehicle".into()),
            SqlValue::Float(0.6),
            SqlValue::Int(24),
            SqlValue::Int(48),
        ]
    );
    assert_parses(&q);
}

#[test]
fn test_every_statement_parses() {
    let layout = custom_layout();
    let filter = ImageFilter::new()
        .search("street_")
        .label("vehicle")
        .label_detail("bus")
        .score_between(0.1, 0.9);

    for q in [
        list_paths_query(&layout, &filter, 12, 0),
        list_all_paths_query(&layout, &filter),
        distinct_labels_query(&layout),
        distinct_label_details_query(&layout, Some("vehicle")),
        distinct_label_details_query(&layout, None),
        score_range_query(&layout),
        count_query(&layout, &filter),
        count_query(&layout, &ImageFilter::new()),
        table_exists_query("vision", "Predictions"),
        find_table_schema_query("Predictions"),
    ] {
        assert_parses(&q);
        assert_eq!(placeholder_count(&q.sql), q.params.len(), "{}", q.sql);
    }
}

#[test]
fn test_values_never_inlined() {
    let hostile = "x' OR '1'='1";
    let filter = ImageFilter::new().search(hostile).label(hostile);
    let q = count_query(&TableLayout::default(), &filter);

    assert!(!q.sql.contains("OR '1'"));
    assert_eq!(
        q.params,
        vec![
            SqlValue::Text("%x' OR '1'='1%".into()),
            SqlValue::Text(hostile.into()),
        ]
    );
    assert_parses(&q);
}

#[test]
fn test_search_wildcards_are_literal() {
    let q = count_query(
        &TableLayout::default(),
        &ImageFilter::new().search("50%_off"),
    );
    assert_eq!(q.params, vec![SqlValue::Text("%50\\%\\_off%".into())]);
}

#[test]
fn test_count_and_page_agree_on_filters() {
    let layout = TableLayout::default();
    let filter = ImageFilter::new().label_detail("tabby").max_score(0.5);

    let count = count_query(&layout, &filter);
    let page = list_paths_query(&layout, &filter, 24, 0);
    let where_clause = |sql: &str| {
        sql.lines()
            .find(|line| line.starts_with("WHERE"))
            .map(str::to_string)
    };

    assert_eq!(where_clause(&count.sql), where_clause(&page.sql));
    assert_eq!(count.params[..], page.params[..2]);
}

#[test]
fn test_catalog_lookup_binds_names() {
    let q = find_table_schema_query("image_predictions");
    assert!(q.sql.contains("\"information_schema\".\"tables\""));
    assert_eq!(
        q.params,
        vec![SqlValue::Text("image_predictions".into()), SqlValue::Int(1)]
    );

    let q = table_exists_query("example", "image_predictions");
    assert!(q.sql.starts_with("SELECT"));
    assert!(q.sql.contains("EXISTS"));
    assert_eq!(
        q.params,
        vec![
            SqlValue::Text("example".into()),
            SqlValue::Text("image_predictions".into()),
        ]
    );
}
