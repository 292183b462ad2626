//! Handlers for the `/customers` resource.
//!
//! Every route is boss-only via [`RequireBoss`]. Unit trees are never
//! patched: create and update both carry the full set of units, and update
//! replaces whatever existed before.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use taskdesk_core::error::CoreError;
use taskdesk_core::types::DbId;
use taskdesk_db::models::customer::{
    CreateCustomer, Customer, CustomerFilters, CustomerWithUnits, UnitSpec, UpdateCustomer,
};
use taskdesk_db::repositories::CustomerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireBoss;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /customers`: the customer's fields plus its
/// initial units.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    #[serde(flatten)]
    pub customer: CreateCustomer,
    #[serde(default)]
    pub units: Vec<UnitSpec>,
}

/// Request body for `PUT /customers/{id}`: a field patch plus the complete
/// replacement set of units.
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    #[serde(flatten)]
    pub customer: UpdateCustomer,
    pub units: Vec<UnitSpec>,
}

/// GET /api/v1/customers
pub async fn list(
    State(state): State<AppState>,
    RequireBoss(_auth): RequireBoss,
    Query(filters): Query<CustomerFilters>,
) -> AppResult<Json<DataResponse<Vec<Customer>>>> {
    let data = CustomerRepo::list(&state.pool, &filters).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/customers
///
/// Create a customer together with its units and workers in one transaction.
pub async fn create(
    State(state): State<AppState>,
    RequireBoss(_auth): RequireBoss,
    Json(input): Json<CreateCustomerRequest>,
) -> AppResult<(StatusCode, Json<CustomerWithUnits>)> {
    if input.customer.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }

    let customer =
        CustomerRepo::create_with_units(&state.pool, &input.customer, &input.units).await?;
    let with_units = CustomerRepo::fetch_with_units(&state.pool, customer.id)
        .await?
        .ok_or_else(|| AppError::InternalError("created customer disappeared".into()))?;

    Ok((StatusCode::CREATED, Json(with_units)))
}

/// GET /api/v1/customers/{id}
///
/// Fetch a customer with its full unit/worker tree.
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireBoss(_auth): RequireBoss,
    Path(id): Path<DbId>,
) -> AppResult<Json<CustomerWithUnits>> {
    let customer = CustomerRepo::fetch_with_units(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    Ok(Json(customer))
}

/// PUT /api/v1/customers/{id}
///
/// Patch the customer's fields and replace the entire unit tree, atomically.
pub async fn update(
    State(state): State<AppState>,
    RequireBoss(_auth): RequireBoss,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCustomerRequest>,
) -> AppResult<Json<CustomerWithUnits>> {
    let updated =
        CustomerRepo::update_with_units(&state.pool, id, &input.customer, &input.units).await?;
    if updated.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }));
    }

    let customer = CustomerRepo::fetch_with_units(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    Ok(Json(customer))
}

/// DELETE /api/v1/customers/{id}
///
/// Delete a customer and its whole subtree (workers, then units, then the
/// customer) in one transaction.
pub async fn delete(
    State(state): State<AppState>,
    RequireBoss(_auth): RequireBoss,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CustomerRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
