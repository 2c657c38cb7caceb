mod common;

use common::*;
use serde_json::json;
use table_lib::source::HttpRowSource;
use table_lib::{
    Direction, FetchError, LoadOutcome, RowQuery, RowSource, SortOutcome, SortSpec,
    SortableTable, TableConfig, TableError, Value,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRODUCTS_PATH: &str = "/api/rest/products";

fn source(server: &MockServer) -> HttpRowSource {
    HttpRowSource::new(&server.uri(), "api/rest/products").unwrap()
}

fn product_json(id: usize) -> serde_json::Value {
    json!({
        "id": format!("product-{id}"),
        "images": format!("{id}.png"),
        "title": format!("Product {id:03}"),
        "quantity": id % 7,
        "price": 100 + id * 3,
        "sales": id * 11,
    })
}

fn page_json(range: std::ops::Range<usize>) -> serde_json::Value {
    serde_json::Value::Array(range.map(product_json).collect())
}

#[tokio::test]
async fn test_fetch_sends_sort_and_range() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("_sort", "price"))
        .and(query_param("_order", "desc"))
        .and(query_param("_start", "40"))
        .and(query_param("_end", "80"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(0..2)))
        .expect(1)
        .mount(&server)
        .await;

    let rows = source(&server)
        .fetch_rows(&RowQuery::new(SortSpec::desc("price"), 40, 40))
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].value("title"), &Value::from("Product 000"));
    assert_eq!(rows[1].value("price").as_number(), Some(103.0));
}

#[tokio::test]
async fn test_fetch_keeps_unknown_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"title": "Lamp", "subcategory": {"id": "lighting"}, "discount": null}
        ])))
        .mount(&server)
        .await;

    let rows = source(&server)
        .fetch_rows(&RowQuery::new(SortSpec::asc("title"), 0, 40))
        .await
        .unwrap();

    assert!(rows[0].value("subcategory").to_string().contains("lighting"));
    assert!(rows[0].value("discount").is_null());
    assert!(rows[0].value("missing").is_null());
}

#[tokio::test]
async fn test_error_status_maps_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = source(&server)
        .fetch_rows(&RowQuery::new(SortSpec::asc("title"), 0, 40))
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        FetchError::Http { status: 500, message } if message == "internal error"
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body_maps_to_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"an array\"}"))
        .mount(&server)
        .await;

    let err = source(&server)
        .fetch_rows(&RowQuery::new(SortSpec::asc("title"), 0, 40))
        .await
        .unwrap_err();

    match err {
        FetchError::Parse { body, .. } => {
            assert_eq!(body.as_deref(), Some("{\"not\": \"an array\"}"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_table_over_http() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("_sort", "title"))
        .and(query_param("_start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(0..30)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("_sort", "title"))
        .and(query_param("_start", "30"))
        .and(query_param("_end", "60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(30..45)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("_sort", "price"))
        .and(query_param("_order", "desc"))
        .and(query_param("_start", "0"))
        .and(query_param("_end", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(40..45)))
        .expect(1)
        .mount(&server)
        .await;

    let config = TableConfig::default().with_page_size(30);
    let table = SortableTable::new(product_columns(), source(&server), config).unwrap();

    table.load().await.unwrap();
    assert_eq!(table.loaded_count(), 30);

    table.request_more().await.unwrap();
    assert_eq!(table.loaded_count(), 45);
    assert!(table.is_exhausted());
    assert_eq!(table.request_more().await.unwrap(), LoadOutcome::Exhausted);

    let outcome = table.toggle_sort("price").await.unwrap();
    assert_eq!(
        outcome,
        SortOutcome::Fetched(LoadOutcome::Committed {
            received: 5,
            appended: false
        })
    );
    assert_eq!(table.sort_spec(), SortSpec::new("price", Direction::Desc));
    assert_eq!(table.loaded_count(), 5);

    let view = table.derive_view();
    assert_eq!(view.body[0].cells[1], "Product 040");
    assert_eq!(view.body[0].cells[0], "<img src=\"40.png\">");
}

#[tokio::test]
async fn test_table_surfaces_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let table =
        SortableTable::new(product_columns(), source(&server), TableConfig::default())
            .unwrap();

    let err = table.load().await.unwrap_err();

    assert!(matches!(
        err,
        TableError::Fetch(FetchError::Http { status: 503, .. })
    ));
    assert!(!table.is_loading());
    assert!(table.rows().is_empty());
}
