//! Order endpoints.
//!
//! These handlers only translate between HTTP and [`crate::core`]: they look things
//! up, turn absent results into 404s and decorate what comes back with links.

use crate::{
    api::{
        ApiState,
        error::ApiError,
        extract::{JsonBody, ResourceId},
        links::{LinkBuilder, Links, ORDER_STATUS_REL, SELF_REL},
        resources::{
            CollectionResource, CreateOrderRequest, OrderResource, OrderStatusRequest,
            OrderStatusResource,
        },
    },
    core::{order, order_status},
    entities,
    errors::Error,
};
use axum::{
    Json,
    extract::{OriginalUri, State},
    http::{StatusCode, Uri, header},
    response::IntoResponse,
};
use std::sync::Arc;

fn not_found(resource: &str, uri: &Uri) -> ApiError {
    ApiError::from_error(Error::not_found(resource), uri.path())
}

fn with_self_link(model: entities::OrderModel, links: &LinkBuilder) -> OrderResource {
    let href = links.order(model.id);
    let mut resource = OrderResource::from(model);
    resource.links.insert(SELF_REL, href);
    resource
}

/// GET /orders
pub async fn list_orders(
    State(state): State<Arc<ApiState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<CollectionResource<OrderResource>>, ApiError> {
    let orders = order::list_orders(&state.database)
        .await
        .map_err(ApiError::at(&uri))?;

    let items = orders
        .into_iter()
        .map(|model| with_self_link(model, &state.links))
        .collect();

    Ok(Json(CollectionResource::new(
        "orders",
        items,
        state.links.orders(),
    )))
}

/// GET /orders/next
pub async fn get_next_order(
    State(state): State<Arc<ApiState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<OrderResource>, ApiError> {
    let next = order::get_next_order(&state.database)
        .await
        .map_err(ApiError::at(&uri))?
        .ok_or_else(|| not_found("next order", &uri))?;

    Ok(Json(with_self_link(next, &state.links)))
}

/// PUT /orders/next
pub async fn advance_next_order(
    State(state): State<Arc<ApiState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<OrderResource>, ApiError> {
    let advanced = order::advance_next_order(&state.database)
        .await
        .map_err(ApiError::at(&uri))?
        .ok_or_else(|| not_found("next order", &uri))?;

    Ok(Json(with_self_link(advanced, &state.links)))
}

/// GET /orders/{id}
pub async fn get_order(
    State(state): State<Arc<ApiState>>,
    OriginalUri(uri): OriginalUri,
    ResourceId(order_id): ResourceId,
) -> Result<Json<OrderResource>, ApiError> {
    let model = order::get_order_by_id(&state.database, order_id)
        .await
        .map_err(ApiError::at(&uri))?
        .ok_or_else(|| not_found("order", &uri))?;

    let mut resource = with_self_link(model, &state.links);
    resource.links.insert(
        ORDER_STATUS_REL,
        state.links.order_status_for_order(order_id),
    );

    Ok(Json(resource))
}

/// POST /orders
///
/// Answers 201 with the new order and its URL in `Location`.
pub async fn create_order(
    State(state): State<Arc<ApiState>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(request): JsonBody<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pizzas = request.pizzas.unwrap_or_default();
    let created = order::create_order(&state.database, pizzas)
        .await
        .map_err(ApiError::at(&uri))?;

    let resource = with_self_link(created, &state.links);
    let location = state.links.order(resource.order_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(resource),
    ))
}

/// GET /orders/{id}/orderStatus
pub async fn get_order_status_for_order(
    State(state): State<Arc<ApiState>>,
    OriginalUri(uri): OriginalUri,
    ResourceId(order_id): ResourceId,
) -> Result<Json<OrderStatusResource>, ApiError> {
    let status = order_status::get_order_status_for_order(&state.database, order_id)
        .await
        .map_err(ApiError::at(&uri))?
        .ok_or_else(|| not_found("order status", &uri))?;

    let mut resource = OrderStatusResource::from(status);
    resource
        .links
        .insert(SELF_REL, state.links.order_status_for_order(order_id));

    Ok(Json(resource))
}

/// PUT /orders/{id}/orderStatus
///
/// Both the order and the target status must exist (404 otherwise). The request
/// body is echoed back on success.
pub async fn put_order_status_for_order(
    State(state): State<Arc<ApiState>>,
    OriginalUri(uri): OriginalUri,
    ResourceId(order_id): ResourceId,
    JsonBody(request): JsonBody<OrderStatusRequest>,
) -> Result<Json<OrderStatusResource>, ApiError> {
    let status_id = request.order_status_id.ok_or_else(|| {
        ApiError::from_error(
            Error::Validation {
                message: "orderStatusId must not be null".to_string(),
            },
            uri.path(),
        )
    })?;

    order::get_order_by_id(&state.database, order_id)
        .await
        .map_err(ApiError::at(&uri))?
        .ok_or_else(|| not_found("order", &uri))?;

    order_status::get_order_status_by_id(&state.database, status_id)
        .await
        .map_err(ApiError::at(&uri))?
        .ok_or_else(|| not_found("order status", &uri))?;

    order::set_order_status(&state.database, order_id, status_id)
        .await
        .map_err(ApiError::at(&uri))?;

    Ok(Json(OrderStatusResource {
        order_status_id: status_id,
        order_status: request.order_status,
        links: Links::default(),
    }))
}
