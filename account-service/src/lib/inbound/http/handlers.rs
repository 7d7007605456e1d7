use std::fmt::Display;

use auth::ExtraClaims;
use auth::JwtError;
use auth::SignedToken;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::FullName;
use crate::account::models::Vehicle;
use crate::inbound::http::router::AppState;

pub mod get_profile;
pub mod login;
pub mod logout;
pub mod register;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    Validation(Vec<String>),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                    Vec::new(),
                )
            }
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
                errors,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, Vec::new()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, Vec::new()),
        };

        (
            status,
            Json(ApiResponseBody::new_error(status, message, errors)),
        )
            .into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidFullName(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidPassword(_)
            | AccountError::InvalidVehicle(_) => ApiError::Validation(vec![err.to_string()]),
            AccountError::Password(_) | AccountError::DatabaseError(_) | AccountError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        ApiError::InternalServerError(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String, errors: Vec<String>) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message, errors },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Collects every request validation failure before rejecting.
#[derive(Debug, Default)]
pub(crate) struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub(crate) fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.0.push(format!("{} is required", field));
        }
        value
    }

    pub(crate) fn check<T, E: Display>(&mut self, result: Result<T, E>) -> Option<T> {
        result.map_err(|e| self.0.push(e.to_string())).ok()
    }

    pub(crate) fn into_result(self) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.0))
        }
    }
}

/// Mint the access token for a freshly registered or logged-in account.
pub(crate) fn issue_session_token(
    state: &AppState,
    account: &Account,
) -> Result<SignedToken, ApiError> {
    let extra = ExtraClaims::from([
        ("email".to_string(), Value::from(account.email.as_str())),
        ("role".to_string(), Value::from(account.role().as_str())),
    ]);

    Ok(state
        .authenticator
        .issue_access_token(&account.id.to_string(), extra)?)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullNameData {
    pub firstname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
}

impl From<&FullName> for FullNameData {
    fn from(fullname: &FullName) -> Self {
        Self {
            firstname: fullname.firstname().to_string(),
            lastname: fullname.lastname().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleData {
    pub color: String,
    pub plate: String,
    pub capacity: i32,
    pub vehicle_type: String,
}

impl From<&Vehicle> for VehicleData {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            color: vehicle.color().to_string(),
            plate: vehicle.plate().to_string(),
            capacity: vehicle.capacity(),
            vehicle_type: vehicle.vehicle_type().as_str().to_string(),
        }
    }
}

/// Public view of an account. The password hash never leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub id: String,
    pub role: String,
    pub fullname: FullNameData,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleData>,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            role: account.role().as_str().to_string(),
            fullname: (&account.fullname).into(),
            email: account.email.as_str().to_string(),
            vehicle: account.vehicle().map(VehicleData::from),
            created_at: account.created_at,
        }
    }
}
