#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests of the REST surface over the in-memory store.

mod common;

use http::StatusCode;
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use common::{app, call, create_item, item_payload};

#[tokio::test]
async fn test_item_lifecycle() {
    let app = app();

    let (status, created) = call(&app, "POST", "/items", Some(item_payload("u@e.com", 5))).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_owned();
    assert_eq!(id.len(), 24);
    assert!(created["insert_date"].is_string());
    assert_eq!(created["expiry_date"], "2025-01-01T00:00:00Z");

    let (status, fetched) = call(&app, "GET", &format!("/items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = call(&app, "DELETE", &format!("/items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "detail": "Item deleted" }));

    let (status, body) = call(&app, "GET", &format!("/items/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item not found");
}

#[tokio::test]
async fn test_insert_date_is_server_time() {
    let app = app();
    let before = OffsetDateTime::now_utc().replace_millisecond(0).unwrap();

    let created = create_item(&app, "u@e.com", 1).await;

    let stamped = OffsetDateTime::parse(created["insert_date"].as_str().unwrap(), &Rfc3339).unwrap();
    assert!(stamped >= before);
}

#[tokio::test]
async fn test_second_delete_is_not_found() {
    let app = app();
    let created = create_item(&app, "u@e.com", 1).await;
    let uri = format!("/items/{}", created["id"].as_str().unwrap());

    assert_eq!(call(&app, "DELETE", &uri, None).await.0, StatusCode::OK);
    assert_eq!(call(&app, "DELETE", &uri, None).await.0, StatusCode::NOT_FOUND);
    assert_eq!(
        call(&app, "DELETE", "/items/652a1f0c9b1e8a3d4c5b6a79", None).await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_update_preserves_insert_date() {
    let app = app();
    let created = create_item(&app, "u@e.com", 5).await;
    let uri = format!("/items/{}", created["id"].as_str().unwrap());

    let mut patch = item_payload("u@e.com", 9);
    patch["insert_date"] = json!("1999-01-01T00:00:00Z");
    patch["name"] = json!("renamed");

    let (status, updated) = call(&app, "PUT", &uri, Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "renamed");
    assert_eq!(updated["quantity"], 9);
    assert_eq!(updated["insert_date"], created["insert_date"]);
    assert_eq!(updated["id"], created["id"]);
}

#[tokio::test]
async fn test_update_with_unchanged_payload_succeeds() {
    let app = app();
    let created = create_item(&app, "u@e.com", 5).await;
    let uri = format!("/items/{}", created["id"].as_str().unwrap());

    let (status, updated) = call(&app, "PUT", &uri, Some(item_payload("u@e.com", 5))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, created);
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let app = app();
    let (status, _) = call(
        &app,
        "PUT",
        "/items/652a1f0c9b1e8a3d4c5b6a79",
        Some(item_payload("u@e.com", 1)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_validates_payload() {
    let app = app();
    let created = create_item(&app, "u@e.com", 5).await;
    let uri = format!("/items/{}", created["id"].as_str().unwrap());

    let (status, body) = call(&app, "PUT", &uri, Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "STOCKROOM_VALIDATION");
}

#[tokio::test]
async fn test_filter_by_quantity_is_inclusive() {
    let app = app();
    for qty in [1, 5, 10] {
        create_item(&app, "u@e.com", qty).await;
    }

    let (status, body) = call(&app, "GET", "/items/filter?quantity=5", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut quantities: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["quantity"].as_i64().unwrap())
        .collect();
    quantities.sort_unstable();
    assert_eq!(quantities, [5, 10]);

    let (_, all) = call(&app, "GET", "/items/filter", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_filter_combines_constraints() {
    let app = app();
    create_item(&app, "a@x.com", 5).await;
    create_item(&app, "a@x.com", 1).await;
    create_item(&app, "b@x.com", 7).await;

    let (_, body) = call(&app, "GET", "/items/filter?email=a@x.com&quantity=2", None).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 5);

    let (_, body) = call(&app, "GET", "/items/filter?email=&quantity=", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_filter_by_expiry_is_strict() {
    let app = app();
    create_item(&app, "u@e.com", 1).await;

    let (_, body) = call(
        &app,
        "GET",
        "/items/filter?expiry_date=2025-01-01T00:00:00Z",
        None,
    )
    .await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = call(&app, "GET", "/items/filter?expiry_date=2024-12-31T23:59:59", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_filter_rejects_unparseable_date() {
    let app = app();
    let (status, body) = call(&app, "GET", "/items/filter?insert_date=yesterday", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "insert_date");
}

#[tokio::test]
async fn test_aggregation_counts_by_email() {
    let app = app();
    for email in ["a@x.com", "a@x.com", "b@x.com"] {
        create_item(&app, email, 1).await;
    }

    let (status, body) = call(&app, "GET", "/items/aggregation", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut rows: Vec<(String, u64)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| (r["_id"].as_str().unwrap().to_owned(), r["count"].as_u64().unwrap()))
        .collect();
    rows.sort();
    assert_eq!(
        rows,
        [("a@x.com".to_owned(), 2), ("b@x.com".to_owned(), 1)]
    );
}

#[tokio::test]
async fn test_aggregation_of_empty_collection() {
    let (status, body) = call(&app(), "GET", "/items/aggregation", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_item_rejects_bad_email() {
    let app = app();
    let (status, body) = call(&app, "POST", "/items", Some(item_payload("not-an-email", 1))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "email");

    let (_, all) = call(&app, "GET", "/items/filter", None).await;
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_body_without_content_type_is_accepted() {
    let app = app();
    let response = {
        use tower::ServiceExt;
        app.clone()
            .oneshot(
                http::Request::post("/items")
                    .body(axum::body::Body::from(item_payload("u@e.com", 1).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    };
    assert_eq!(response.status(), StatusCode::OK);

    let (_, all) = call(&app, "GET", "/items/filter?email=u@e.com", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_undecodable_body_is_422_on_every_write() {
    use tower::ServiceExt;

    let app = app();
    let created = create_item(&app, "u@e.com", 1).await;
    let item_path = format!("/items/{}", created["id"].as_str().unwrap());

    for (method, uri) in [
        ("POST", "/items"),
        ("PUT", item_path.as_str()),
        ("POST", "/clock-in"),
    ] {
        let response = app
            .clone()
            .oneshot(
                http::Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{method} {uri}");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["instance"], uri);
    }
}

#[tokio::test]
async fn test_integral_float_quantity_is_accepted() {
    let app = app();
    let mut payload = item_payload("f@e.com", 0);
    payload["quantity"] = json!(5.0);

    let (status, body) = call(&app, "POST", "/items", Some(payload)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["quantity"], 5);
}

#[tokio::test]
async fn test_clock_in_lifecycle() {
    let app = app();

    let (status, created) = call(
        &app,
        "POST",
        "/clock-in",
        Some(json!({ "email": "a@x.com", "location": "Dock 4" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(created["insert_datetime"].is_string());
    let uri = format!("/clock-in/{}", created["id"].as_str().unwrap());

    let (status, fetched) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = call(
        &app,
        "PUT",
        &uri,
        Some(json!({
            "email": "a@x.com",
            "location": "Dock 5",
            "insert_datetime": "1999-01-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["location"], "Dock 5");
    assert_eq!(updated["insert_datetime"], created["insert_datetime"]);

    let (status, body) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "detail": "Clock-in record deleted" }));

    let (status, body) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Clock-in record not found");
}

#[tokio::test]
async fn test_clock_in_filter() {
    let app = app();
    for (email, location) in [("a@x.com", "Dock 4"), ("b@x.com", "Dock 4"), ("a@x.com", "Gate")] {
        let (status, _) = call(
            &app,
            "POST",
            "/clock-in",
            Some(json!({ "email": email, "location": location })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = call(&app, "GET", "/clock-in/filter?location=Dock%204", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = call(&app, "GET", "/clock-in/filter?email=a@x.com&location=Gate", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = call(
        &app,
        "GET",
        "/clock-in/filter?insert_datetime=2000-01-01T00:00:00Z",
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_malformed_and_missing_ids_share_a_body() {
    let app = app();
    let (s1, malformed) = call(&app, "GET", "/clock-in/123", None).await;
    let (s2, missing) = call(&app, "GET", "/clock-in/652a1f0c9b1e8a3d4c5b6a79", None).await;
    assert_eq!(s1, StatusCode::NOT_FOUND);
    assert_eq!(s2, StatusCode::NOT_FOUND);
    assert_eq!(malformed, missing);
}

#[tokio::test]
async fn test_resources_are_independent() {
    let app = app();
    let item = create_item(&app, "u@e.com", 1).await;

    let (status, _) = call(
        &app,
        "GET",
        &format!("/clock-in/{}", item["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
