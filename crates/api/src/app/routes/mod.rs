use axum::{
    routing::{get, post, put},
    Router,
};

pub mod products;
pub mod system;

/// Router for the product endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/products", get(products::list_products))
        .route("/product", post(products::create_product))
        .route(
            "/product/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/product/:id/discount", put(products::apply_discount))
}
