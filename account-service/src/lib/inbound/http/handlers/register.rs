use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::issue_session_token;
use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use super::ValidationErrors;
use crate::account::models::AccountProfile;
use crate::account::models::EmailAddress;
use crate::account::models::FullName;
use crate::account::models::Password;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::Role;
use crate::account::models::Vehicle;
use crate::account::models::VehicleType;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<(CookieJar, ApiSuccess<RegisterResponseData>), ApiError> {
    let account = state
        .account_service
        .register(body.try_into_command(role)?)
        .await?;

    let token = issue_session_token(&state, &account)?;
    let jar = state.session.attach(jar, &token);

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::CREATED,
            RegisterResponseData {
                account: (&account).into(),
                token: token.into_string(),
            },
        ),
    ))
}

/// HTTP request body for registration (raw JSON)
///
/// Every field is optional at the wire level so that missing fields are
/// reported together with the other validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    fullname: Option<FullNameBody>,
    email: Option<String>,
    password: Option<String>,
    vehicle: Option<VehicleBody>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FullNameBody {
    firstname: Option<String>,
    lastname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleBody {
    color: Option<String>,
    plate: Option<String>,
    capacity: Option<i32>,
    vehicle_type: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self, role: Role) -> Result<RegisterAccountCommand, ApiError> {
        let mut errors = ValidationErrors::default();

        let fullname = self.fullname.unwrap_or_default();
        let fullname = errors
            .required("First Name", fullname.firstname)
            .and_then(|firstname| errors.check(FullName::new(firstname, fullname.lastname)));
        let email = errors
            .required("Email", self.email)
            .and_then(|email| errors.check(EmailAddress::new(email)));
        let password = errors
            .required("Password", self.password)
            .and_then(|password| errors.check(Password::for_registration(password)));

        let profile = match role {
            Role::User => Some(AccountProfile::User),
            Role::Captain => errors
                .required("Vehicle", self.vehicle)
                .and_then(|vehicle| vehicle.validate(&mut errors))
                .map(AccountProfile::Captain),
        };

        errors.into_result()?;

        match (fullname, email, password, profile) {
            (Some(fullname), Some(email), Some(password), Some(profile)) => Ok(
                RegisterAccountCommand::new(fullname, email, password, profile),
            ),
            _ => Err(ApiError::Validation(vec!["Invalid request".to_string()])),
        }
    }
}

impl VehicleBody {
    fn validate(self, errors: &mut ValidationErrors) -> Option<Vehicle> {
        let color = errors.required("Vehicle Color", self.color);
        let plate = errors.required("Vehicle Plate", self.plate);
        let capacity = errors.required("Vehicle Capacity", self.capacity);
        let vehicle_type = errors
            .required("Vehicle Type", self.vehicle_type)
            .and_then(|vehicle_type| errors.check(vehicle_type.parse::<VehicleType>()));

        let (color, plate, capacity, vehicle_type) = (color?, plate?, capacity?, vehicle_type?);
        errors.check(Vehicle::new(color, plate, capacity, vehicle_type))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub account: AccountData,
    pub token: String,
}
