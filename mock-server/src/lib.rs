use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
}

/// Body of both POST and PUT. PUT replaces every field.
#[derive(Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: String,
    pub description: String,
}

/// Products in insertion order, so listings are stable between calls.
pub type Db = Arc<RwLock<Vec<Product>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router preloaded with `products`.
pub fn app_with(products: Vec<Product>) -> Router {
    let db: Db = Arc::new(RwLock::new(products));
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    Json(db.read().await.clone())
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<ProductInput>,
) -> (StatusCode, Json<Product>) {
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        price: input.price,
        description: input.description,
    };
    db.write().await.push(product.clone());
    tracing::info!(id = %product.id, "product created");
    (StatusCode::CREATED, Json(product))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Product>, StatusCode> {
    let products = db.read().await;
    products
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, StatusCode> {
    let mut products = db.write().await;
    let product = products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    product.name = input.name;
    product.price = input.price;
    product.description = input.description;
    tracing::info!(%id, "product updated");
    Ok(Json(product.clone()))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut products = db.write().await;
    let index = products
        .iter()
        .position(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    products.remove(index);
    tracing::info!(%id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
