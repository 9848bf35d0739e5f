//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use product_core::{
    Draft, HttpMethod, HttpRequest, HttpResponse, NetworkError, Product, ProductClient, ProductId,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> ProductClient {
    ProductClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn load(raw: &str) -> Vec<serde_json::Value> {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Check method, path, headers and JSON body of a built request.
fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    let expected_headers: Vec<(String, String)> = expected
        .get("headers")
        .and_then(|h| h.as_array())
        .map(|headers| {
            headers
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match expected.get("body") {
        Some(body) => {
            let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn assert_expected_error(name: &str, err: NetworkError, expected: &serde_json::Value) {
    match expected.as_str().unwrap() {
        "NotFound" => assert!(err.is_not_found(), "{name}: expected 404, got {err}"),
        "Status" => assert!(err.status().is_some(), "{name}: expected status error, got {err}"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        assert_request(name, &c.build_list(), &case["expected_request"]);

        let result = c.parse_list(simulated(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Vec<Product> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: Draft = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_create(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let product = c.parse_create(simulated(&case)).unwrap();
        let expected: Product = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(product, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = ProductId::new(case["input_id"].as_str().unwrap());
        let input: Draft = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_update(&id, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_update(simulated(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Product = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = ProductId::new(case["input_id"].as_str().unwrap());
        assert_request(name, &c.build_delete(&id), &case["expected_request"]);

        let result = c.parse_delete(simulated(&case));
        match case.get("expected_error") {
            Some(expected_error) => assert_expected_error(name, result.unwrap_err(), expected_error),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}
