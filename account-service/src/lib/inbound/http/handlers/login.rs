use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::issue_session_token;
use super::ApiError;
use super::ApiSuccess;
use super::FullNameData;
use super::ValidationErrors;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::Password;
use crate::account::models::Role;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let account = state
        .account_service
        .login(body.try_into_command(role)?)
        .await?;

    let token = issue_session_token(&state, &account)?;
    let jar = state.session.attach(jar, &token);

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                user_id: account.id.to_string(),
                fullname: (&account.fullname).into(),
                email: account.email.as_str().to_string(),
                token: token.into_string(),
            },
        ),
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequest {
    fn try_into_command(self, role: Role) -> Result<LoginCommand, ApiError> {
        let mut errors = ValidationErrors::default();

        let email = errors
            .required("Email", self.email)
            .and_then(|email| errors.check(EmailAddress::new(email)));
        let password = errors
            .required("Password", self.password)
            .and_then(|password| errors.check(Password::for_login(password)));

        errors.into_result()?;

        match (email, password) {
            (Some(email), Some(password)) => Ok(LoginCommand {
                role,
                email,
                password,
            }),
            _ => Err(ApiError::Validation(vec!["Invalid request".to_string()])),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub user_id: String,
    pub fullname: FullNameData,
    pub email: String,
    pub token: String,
}
