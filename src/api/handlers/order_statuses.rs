//! Status endpoints.

use crate::{
    api::{
        ApiState,
        error::ApiError,
        extract::ResourceId,
        links::SELF_REL,
        resources::{CollectionResource, OrderStatusResource},
    },
    core::order_status,
    errors::Error,
};
use axum::{
    Json,
    extract::{OriginalUri, State},
};
use std::sync::Arc;

/// GET /orderStatuses
pub async fn list_order_statuses(
    State(state): State<Arc<ApiState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<CollectionResource<OrderStatusResource>>, ApiError> {
    let statuses = order_status::list_order_statuses(&state.database)
        .await
        .map_err(ApiError::at(&uri))?;

    let items = statuses
        .into_iter()
        .map(|status| {
            let href = state.links.order_status(status.id);
            let mut resource = OrderStatusResource::from(status);
            resource.links.insert(SELF_REL, href);
            resource
        })
        .collect();

    Ok(Json(CollectionResource::new(
        "orderStatuses",
        items,
        state.links.order_statuses(),
    )))
}

/// GET /orderStatuses/{id}
pub async fn get_order_status(
    State(state): State<Arc<ApiState>>,
    OriginalUri(uri): OriginalUri,
    ResourceId(status_id): ResourceId,
) -> Result<Json<OrderStatusResource>, ApiError> {
    let status = order_status::get_order_status_by_id(&state.database, status_id)
        .await
        .map_err(ApiError::at(&uri))?
        .ok_or_else(|| ApiError::from_error(Error::not_found("order status"), uri.path()))?;

    let mut resource = OrderStatusResource::from(status);
    resource
        .links
        .insert(SELF_REL, state.links.order_status(status_id));

    Ok(Json(resource))
}
