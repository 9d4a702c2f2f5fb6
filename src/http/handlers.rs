//! Request handlers for the account routes
//!
//! Each handler validates its input, delegates to [`AccountService`], and
//! picks the success status. Failures are turned into responses by the
//! `IntoResponse` impl in `http::error`.

use crate::core::{AccountService, AccountStore, Validate};
use crate::http::error::{reject_body, reject_path};
use crate::types::{
    AccountError, AccountId, AccountResponse, CreateAccountRequest, UpdateAccountRequest,
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

type ApiResult<T> = Result<T, AccountError>;

/// `POST /api/accounts`
pub async fn create_account<S: AccountStore + 'static>(
    State(service): State<AccountService<S>>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AccountResponse>)> {
    let Json(request) = payload.map_err(reject_body)?;
    request.validate()?;

    let created = service.create(request)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/accounts`
pub async fn list_accounts<S: AccountStore + 'static>(
    State(service): State<AccountService<S>>,
) -> ApiResult<Json<Vec<AccountResponse>>> {
    Ok(Json(service.list_all()?))
}

/// `GET /api/accounts/:id`
pub async fn get_account<S: AccountStore + 'static>(
    State(service): State<AccountService<S>>,
    id: Result<Path<AccountId>, PathRejection>,
) -> ApiResult<Json<AccountResponse>> {
    let Path(id) = id.map_err(reject_path)?;
    Ok(Json(service.get_by_id(id)?))
}

/// `GET /api/accounts/display-name/:name`
pub async fn get_account_by_display_name<S: AccountStore + 'static>(
    State(service): State<AccountService<S>>,
    Path(display_name): Path<String>,
) -> ApiResult<Json<AccountResponse>> {
    Ok(Json(service.get_by_display_name(&display_name)?))
}

/// `GET /api/accounts/contact/:address`
pub async fn get_account_by_contact_address<S: AccountStore + 'static>(
    State(service): State<AccountService<S>>,
    Path(address): Path<String>,
) -> ApiResult<Json<AccountResponse>> {
    Ok(Json(service.get_by_contact_address(&address)?))
}

/// `PUT /api/accounts/:id`
pub async fn update_account<S: AccountStore + 'static>(
    State(service): State<AccountService<S>>,
    id: Result<Path<AccountId>, PathRejection>,
    payload: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> ApiResult<Json<AccountResponse>> {
    let Path(id) = id.map_err(reject_path)?;
    let Json(request) = payload.map_err(reject_body)?;
    request.validate()?;

    Ok(Json(service.update(id, request)?))
}

/// `DELETE /api/accounts/:id`
pub async fn delete_account<S: AccountStore + 'static>(
    State(service): State<AccountService<S>>,
    id: Result<Path<AccountId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id.map_err(reject_path)?;
    service.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
