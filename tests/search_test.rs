use readmark::domain::DomainError;
use readmark::google_books::GoogleBooksClient;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn volumes_payload() -> serde_json::Value {
    json!({
        "totalItems": 3,
        "items": [
            {
                "id": "vol-1",
                "volumeInfo": {
                    "title": "The Left Hand of Darkness",
                    "authors": ["Ursula K. Le Guin"],
                    "publishedDate": "1969",
                    "description": "A novel.",
                    "imageLinks": {
                        "thumbnail": "http://books.google.com/thumb1.jpg"
                    },
                    "industryIdentifiers": [
                        { "type": "ISBN_13", "identifier": "9780441478125" }
                    ]
                }
            },
            {
                // No title, must be dropped from the results
                "id": "vol-2",
                "volumeInfo": {
                    "authors": ["Anonymous"]
                }
            },
            {
                "id": "vol-3",
                "volumeInfo": {
                    "title": "Sparse Entry"
                }
            }
        ]
    })
}

#[tokio::test]
async fn search_maps_volumes_into_hits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("q", "le guin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(volumes_payload()))
        .mount(&server)
        .await;

    let client = GoogleBooksClient::new(server.uri(), None);
    let hits = client.search("le guin").await.expect("search failed");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "vol-1");
    assert_eq!(hits[0].title, "The Left Hand of Darkness");
    assert_eq!(hits[0].authors, vec!["Ursula K. Le Guin"]);
    // http thumbnails are upgraded to https
    assert_eq!(
        hits[0].thumbnail.as_deref(),
        Some("https://books.google.com/thumb1.jpg")
    );
    assert_eq!(hits[0].identifiers.len(), 1);
    assert_eq!(hits[0].identifiers[0].identifier, "9780441478125");

    assert_eq!(hits[1].id, "vol-3");
    assert!(hits[1].authors.is_empty());
    assert!(hits[1].thumbnail.is_none());
}

#[tokio::test]
async fn search_handles_empty_result_sets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalItems": 0 })))
        .mount(&server)
        .await;

    let client = GoogleBooksClient::new(server.uri(), None);
    let hits = client.search("nothing").await.expect("search failed");
    assert!(hits.is_empty());
}

#[tokio::test]
async fn search_sends_the_api_key_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalItems": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleBooksClient::new(server.uri(), Some("test-key".to_string()));
    client.search("anything").await.expect("search failed");
}

#[tokio::test]
async fn upstream_failure_surfaces_as_external_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = GoogleBooksClient::new(server.uri(), None);
    let err = client
        .search("boom")
        .await
        .expect_err("500 upstream must fail");
    assert!(matches!(err, DomainError::External(_)));
}

#[tokio::test]
async fn malformed_payload_surfaces_as_external_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = GoogleBooksClient::new(server.uri(), None);
    let err = client
        .search("garbled")
        .await
        .expect_err("non-JSON body must fail");
    assert!(matches!(err, DomainError::External(_)));
}
