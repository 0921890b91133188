//! Login, registration and token refresh. None of these endpoints take a
//! bearer token.

use edumall_core::DataResponse;
use edumall_core::schema::auth::{
    Credentials, LoginRequest, LoginResult, RefreshCheck, RefreshTokenRequest, RegisterRequest,
    User,
};
use tracing::instrument;
use validator::Validate;

use crate::error::ApiError;
use crate::http::{Endpoint, HttpClient};

/// `POST mobile/login`.
///
/// # Errors
///
/// Returns an error if the body fails its field rules.
pub fn login_endpoint(body: &LoginRequest) -> Result<Endpoint, ApiError> {
    body.validate()?;
    Endpoint::post("mobile/login").json(body)
}

/// Exchange username and password for a user and token pair.
///
/// # Errors
///
/// Returns an error if the request is invalid, the server rejects it or the
/// response does not match its schema.
#[instrument(skip(http, body), fields(username = %body.username))]
pub async fn login(
    http: &HttpClient,
    body: &LoginRequest,
) -> Result<DataResponse<LoginResult>, ApiError> {
    http.send(login_endpoint(body)?).await
}

/// `POST mobile/refresh-token`.
///
/// # Errors
///
/// Returns an error if the body fails its field rules.
pub fn refresh_token_endpoint(body: &RefreshTokenRequest) -> Result<Endpoint, ApiError> {
    body.validate()?;
    Endpoint::post("mobile/refresh-token").json(body)
}

/// Trade a refresh token for a new token pair.
///
/// # Errors
///
/// Returns an error if the request is invalid, the server rejects it or the
/// response does not match its schema.
#[instrument(skip_all)]
pub async fn refresh_token(
    http: &HttpClient,
    body: &RefreshTokenRequest,
) -> Result<DataResponse<Credentials>, ApiError> {
    http.send(refresh_token_endpoint(body)?).await
}

/// `POST auth/register`.
///
/// # Errors
///
/// Returns an error if the body fails its field rules.
pub fn register_endpoint(body: &RegisterRequest) -> Result<Endpoint, ApiError> {
    body.validate()?;
    Endpoint::post("auth/register").json(body)
}

/// Create a customer account.
///
/// # Errors
///
/// Returns an error if the request is invalid, the server rejects it or the
/// response does not match its schema.
#[instrument(skip(http, body), fields(username = %body.username))]
pub async fn register(
    http: &HttpClient,
    body: &RegisterRequest,
) -> Result<DataResponse<User>, ApiError> {
    http.send(register_endpoint(body)?).await
}

/// `POST mobile/check-refresh`.
///
/// # Errors
///
/// Returns an error if the body fails its field rules.
pub fn check_refresh_endpoint(body: &RefreshTokenRequest) -> Result<Endpoint, ApiError> {
    body.validate()?;
    Endpoint::post("mobile/check-refresh").json(body)
}

/// Ask the server whether a refresh token is still usable.
///
/// # Errors
///
/// Returns an error if the request is invalid, the server rejects it or the
/// response does not match its schema.
#[instrument(skip_all)]
pub async fn check_refresh(
    http: &HttpClient,
    body: &RefreshTokenRequest,
) -> Result<DataResponse<RefreshCheck>, ApiError> {
    http.send(check_refresh_endpoint(body)?).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::test_support::{json_body, url};
    use crate::http::HttpMethod;

    #[test]
    fn test_login_endpoint() {
        let endpoint = login_endpoint(&LoginRequest {
            username: "lan".to_string(),
            password: "matkhau123".to_string(),
        })
        .unwrap();
        assert_eq!(endpoint.method, HttpMethod::Post);
        assert_eq!(url(&endpoint), "https://api.edumall.vn/api/mobile/login");
        assert!(endpoint.bearer.is_none());
        assert_eq!(
            json_body(&endpoint),
            serde_json::json!({"username": "lan", "password": "matkhau123"})
        );
    }

    #[test]
    fn test_login_endpoint_rejects_empty_password() {
        let err = login_endpoint(&LoginRequest {
            username: "lan".to_string(),
            password: String::new(),
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_refresh_endpoints() {
        let body = RefreshTokenRequest {
            refresh_token: "ref".to_string(),
        };
        let refresh = refresh_token_endpoint(&body).unwrap();
        assert_eq!(url(&refresh), "https://api.edumall.vn/api/mobile/refresh-token");
        assert_eq!(json_body(&refresh), serde_json::json!({"refreshToken": "ref"}));

        let check = check_refresh_endpoint(&body).unwrap();
        assert_eq!(url(&check), "https://api.edumall.vn/api/mobile/check-refresh");
    }

    #[test]
    fn test_register_endpoint() {
        let endpoint = register_endpoint(&RegisterRequest {
            username: "lan".to_string(),
            email: "lan@edumall.vn".to_string(),
            password: "matkhau123".to_string(),
            full_name: "Nguyễn Thị Lan".to_string(),
        })
        .unwrap();
        assert_eq!(url(&endpoint), "https://api.edumall.vn/api/auth/register");
        assert_eq!(json_body(&endpoint)["fullName"], "Nguyễn Thị Lan");
    }
}
