use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Product};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn tent() -> Product {
    Product {
        id: "1".to_string(),
        name: "Tent".to_string(),
        price: "100".to_string(),
        description: "2-person".to_string(),
    }
}

// --- list ---

#[tokio::test]
async fn list_products_empty() {
    let resp = app().oneshot(empty_request("GET", "/products")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Product> = body_json(resp).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn list_products_preloaded() {
    let resp = app_with(vec![tent()])
        .oneshot(empty_request("GET", "/products"))
        .await
        .unwrap();

    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products, vec![tent()]);
}

// --- create ---

#[tokio::test]
async fn create_product_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/products",
            r#"{"name":"Lamp","price":"9","description":"led"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Product = body_json(resp).await;
    assert!(!product.id.is_empty());
    assert_eq!(product.name, "Lamp");
    assert_eq!(product.price, "9");
}

#[tokio::test]
async fn create_product_missing_field_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/products", r#"{"name":"Lamp"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update ---

#[tokio::test]
async fn update_product_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/products/missing",
            r#"{"name":"Nope","price":"","description":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_product_replaces_every_field() {
    let resp = app_with(vec![tent()])
        .oneshot(json_request(
            "PUT",
            "/products/1",
            r#"{"name":"Tent","price":"120","description":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Product = body_json(resp).await;
    assert_eq!(updated.id, "1");
    assert_eq!(updated.price, "120");
    assert_eq!(updated.description, "");
}

// --- delete ---

#[tokio::test]
async fn delete_product_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/products/missing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two, to check ordering
    let mut ids = Vec::new();
    for name in ["Tent", "Stove"] {
        let body = format!(r#"{{"name":"{name}","price":"10","description":""}}"#);
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/products", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Product = body_json(resp).await;
        ids.push(created.id);
    }

    // list keeps insertion order
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/products"))
        .await
        .unwrap();
    let products: Vec<Product> = body_json(resp).await;
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Tent", "Stove"]);

    // update the first
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/products/{}", ids[0]),
            r#"{"name":"Tent","price":"120","description":"2-person"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // get reflects the update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/products/{}", ids[0])))
        .await
        .unwrap();
    let fetched: Product = body_json(resp).await;
    assert_eq!(fetched.price, "120");
    assert_eq!(fetched.description, "2-person");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/products/{}", ids[0])))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/products/{}", ids[0])))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: only the second remains
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/products"))
        .await
        .unwrap();
    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, ids[1]);
}
