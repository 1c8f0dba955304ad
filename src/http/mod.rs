//! HTTP surface: router, handlers, views, and the JSON response envelope.
//!
//! Every response body is `{success, message?, data?, error?}`; error
//! variants map to 400 (bad input), 404 (missing record), 500 (storage).

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::domain::aggregates::{Cart, CartLine, Order, OrderLine, OrderStatus, Product};
use crate::domain::value_objects::{Money, ShopperId};
use crate::service::{CartService, CatalogService, CheckoutService};
use crate::store::MemoryStore;
use crate::ShopError;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub carts: CartService,
    pub checkout: CheckoutService,
}

impl AppState {
    /// Wires every service over one shared in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            catalog: CatalogService::new(store.clone()),
            carts: CartService::new(store.clone(), store.clone()),
            checkout: CheckoutService::new(store.clone(), store),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(get_products))
        .route("/products/seed", post(seed_products))
        .route("/cart", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route(
            "/cart/:line_id",
            put(update_cart_item).delete(remove_cart_item),
        )
        .route("/checkout", post(place_order))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// =============================================================================
// Response envelope
// =============================================================================

/// Uniform response envelope shared by every route.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    fn ok_with_message(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
            error: None,
        }
    }
}

/// JSON body extractor whose rejection goes through the envelope: a missing
/// or malformed body is a 400 validation failure, never a bare 422.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ShopError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ShopError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = match self {
            ShopError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ShopError::NotFound(_) => StatusCode::NOT_FOUND,
            ShopError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ApiResponse::failure(self.to_string()))).into_response()
    }
}

// =============================================================================
// Views
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub price: Money,
    pub description: String,
    pub image: String,
    pub category: String,
}

impl From<&Product> for ProductView {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id(),
            name: p.name().to_string(),
            price: p.price(),
            description: p.description().to_string(),
            image: p.image().to_string(),
            category: p.category().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub quantity: u32,
}

impl From<&CartLine> for CartLineView {
    fn from(l: &CartLine) -> Self {
        Self {
            id: l.id,
            product_id: l.product_id,
            name: l.name.clone(),
            price: l.price,
            image: l.image.clone(),
            quantity: l.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub shopper_id: String,
    pub items: Vec<CartLineView>,
    pub total_price: Money,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            shopper_id: cart.shopper_id().to_string(),
            items: cart.items().iter().map(CartLineView::from).collect(),
            total_price: cart.total_price(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineView {
    pub product_id: Uuid,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<OrderLineView>,
    pub total_amount: Money,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id(),
            customer_name: order.customer_name().to_string(),
            customer_email: order.customer_email().to_string(),
            items: order
                .items()
                .iter()
                .map(|l| OrderLineView {
                    product_id: l.product_id,
                    name: l.name.clone(),
                    price: l.price,
                    quantity: l.quantity,
                })
                .collect(),
            total_amount: order.total_amount(),
            order_date: order.placed_at(),
            order_status: order.status(),
        }
    }
}

// =============================================================================
// Request bodies
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartBody {
    pub product_id: Uuid,
    // A missing quantity validates as zero and is rejected as bad input.
    #[serde(default)]
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityBody {
    #[serde(default)]
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub cart_items: Vec<CheckoutItemBody>,
}

/// A client-submitted cart line. Trusted verbatim (price included); the
/// server only converts the quantity into the unsigned domain type.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItemBody {
    pub product_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

// =============================================================================
// Handlers
// =============================================================================

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "healthy", "service": "minishop"}))
}

async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductView>>>, ShopError> {
    let products = state.catalog.list().await?;
    Ok(Json(ApiResponse::ok(
        products.iter().map(ProductView::from).collect(),
    )))
}

async fn seed_products(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<ProductView>>>), ShopError> {
    let products = state.catalog.seed().await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            "Products seeded successfully",
            products.iter().map(ProductView::from).collect(),
        )),
    ))
}

async fn get_cart(State(state): State<AppState>) -> Result<Json<ApiResponse<CartView>>, ShopError> {
    let cart = state.carts.get_or_create(&ShopperId::guest()).await?;
    Ok(Json(ApiResponse::ok(CartView::from(&cart))))
}

async fn add_to_cart(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AddToCartBody>,
) -> Result<Json<ApiResponse<CartView>>, ShopError> {
    let cart = state
        .carts
        .add_item(&ShopperId::guest(), body.product_id, body.quantity)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Item added to cart",
        CartView::from(&cart),
    )))
}

async fn update_cart_item(
    State(state): State<AppState>,
    Path(line_id): Path<Uuid>,
    JsonBody(body): JsonBody<UpdateQuantityBody>,
) -> Result<Json<ApiResponse<CartView>>, ShopError> {
    let cart = state
        .carts
        .update_quantity(&ShopperId::guest(), line_id, body.quantity)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Cart updated",
        CartView::from(&cart),
    )))
}

async fn remove_cart_item(
    State(state): State<AppState>,
    Path(line_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CartView>>, ShopError> {
    let cart = state
        .carts
        .remove_item(&ShopperId::guest(), line_id)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Item removed from cart",
        CartView::from(&cart),
    )))
}

async fn clear_cart(State(state): State<AppState>) -> Result<Json<ApiResponse<CartView>>, ShopError> {
    let cart = state.carts.clear(&ShopperId::guest()).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Cart cleared",
        CartView::from(&cart),
    )))
}

async fn place_order(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CheckoutBody>,
) -> Result<(StatusCode, Json<ApiResponse<OrderView>>), ShopError> {
    let mut items = Vec::with_capacity(body.cart_items.len());
    for item in body.cart_items {
        let quantity = u32::try_from(item.quantity)
            .map_err(|_| ShopError::InvalidArgument("Valid quantity is required".to_string()))?;
        items.push(OrderLine {
            product_id: item.product_id,
            name: item.name,
            price: Money::new(item.price),
            quantity,
        });
    }
    let order = state
        .checkout
        .checkout(
            &ShopperId::guest(),
            &body.customer_name,
            &body.customer_email,
            items,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            "Order placed successfully",
            OrderView::from(&order),
        )),
    ))
}
