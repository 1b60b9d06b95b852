use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use storefront_infra::StoreError;
use storefront_products::Discount;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::SharedStore;

type QueryPairs = Query<Vec<(String, String)>>;

/// `GET /products?min_price=&max_price=&count=&start=`
pub async fn list_products(
    Extension(store): Extension<SharedStore>,
    Query(params): QueryPairs,
) -> Result<Response, ApiError> {
    let query = dto::list_query(&params);
    let products = store.list(&query).await?;
    Ok((StatusCode::OK, Json(products)).into_response())
}

/// `GET /product/{id}`
pub async fn get_product(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = dto::parse_product_id(&id)?;
    let product = store.get(id).await?;
    Ok((StatusCode::OK, Json(product)).into_response())
}

/// `POST /product` with `{"name", "price"}`.
pub async fn create_product(
    Extension(store): Extension<SharedStore>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let draft = dto::parse_product_request(&body)?;
    let product = store.create(&draft).await?;
    tracing::info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

/// `PUT /product/{id}`: full replace of name and price.
pub async fn update_product(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id = dto::parse_product_id(&id)?;
    let draft = dto::parse_product_request(&body)?;
    let product = store.update(id, &draft).await?;
    Ok((StatusCode::OK, Json(product)).into_response())
}

/// `DELETE /product/{id}`.
///
/// Idempotent: an id with no row still answers `{"result":"success"}`.
pub async fn delete_product(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = dto::parse_product_id(&id)?;
    match store.delete(id).await {
        Ok(()) => tracing::info!(product_id = %id, "product deleted"),
        Err(StoreError::NotFound) => tracing::debug!(product_id = %id, "delete of absent product"),
        Err(e) => return Err(e.into()),
    }
    Ok((StatusCode::OK, Json(json!({ "result": "success" }))).into_response())
}

/// `PUT /product/{id}/discount?discount=N`.
///
/// Checks run in a fixed order: id shape, presence of `discount` (absent
/// behaves like an unmatched route), number format, `[0, 100]` range, and
/// finally existence of the product.
pub async fn apply_discount(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
    Query(params): QueryPairs,
) -> Result<Response, ApiError> {
    let id = dto::parse_product_id(&id)?;
    let Some(raw) = dto::first_value(&params, "discount") else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    let discount = Discount::parse(raw)?;

    let product = store.apply_discount(id, discount).await?;
    tracing::info!(product_id = %id, percent = %discount.percent(), "discount applied");
    Ok((StatusCode::OK, Json(product)).into_response())
}
