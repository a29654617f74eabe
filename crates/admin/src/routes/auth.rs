//! Authentication and signup route handlers.
//!
//! Login is plain email + password against the customer table. Signup is a
//! two-phase flow: the first request checks that the email and phone are
//! unused and asks the SMS provider to deliver a code; the second request
//! carries the full account data with the code and only then creates the
//! account. No account row exists until the code checks out.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use boutique_core::{Email, Phone};

use crate::db::{UserRepository, VerificationRepository};
use crate::error::AppError;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, NewUser};
use crate::state::AppState;

/// Bcrypt work factor for password hashing.
const BCRYPT_COST: u32 = 10;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/register", post(register))
        .route("/auth/register/verify", post(register_verify))
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

/// Phase-one signup body: just the contact points to verify.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    email: String,
    phone: String,
}

/// Phase-two signup body: the full account data plus the submitted code.
#[derive(Debug, Deserialize)]
pub struct VerifyRegistrationRequest {
    data: RegistrationData,
}

/// Account data submitted in phase two of the signup flow.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    firstname: String,
    lastname: String,
    email: String,
    phone: String,
    password: String,
    address: String,
    city: String,
    #[serde(default)]
    zip: Option<String>,
    #[serde(default)]
    country: Option<String>,
    code: String,
}

impl RegistrationData {
    fn validate(&self) -> Result<(), String> {
        if self.firstname.trim().is_empty() {
            return Err("First name is required".to_owned());
        }
        if self.lastname.trim().is_empty() {
            return Err("Last name is required".to_owned());
        }
        if self.address.trim().is_empty() {
            return Err("Address is required".to_owned());
        }
        if self.city.trim().is_empty() {
            return Err("City is required".to_owned());
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            ));
        }
        Ok(())
    }
}

fn parse_email(raw: &str) -> Result<Email, AppError> {
    Email::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn parse_phone(raw: &str) -> Result<Phone, AppError> {
    Phone::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Reject the signup early when either contact point is taken; the two
/// collisions answer with distinct messages.
async fn check_contact_points_free(
    users: &UserRepository<'_>,
    email: &Email,
    phone: &Phone,
) -> Result<(), AppError> {
    if users.email_exists(email).await? {
        return Err(AppError::BadRequest(
            "An account with this email address already exists".to_owned(),
        ));
    }
    if users.phone_exists(phone).await? {
        return Err(AppError::BadRequest(
            "An account with this phone number already exists".to_owned(),
        ));
    }
    Ok(())
}

/// `POST /api/auth/login`
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = parse_email(&body.email)?;

    let users = UserRepository::new(state.pool());
    let user = users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("No account with this email".to_owned()))?;

    let matches = bcrypt::verify(&body.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("password verification failed: {e}")))?;
    if !matches {
        return Err(AppError::Unauthorized("Incorrect password".to_owned()));
    }

    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
        firstname: user.firstname.clone(),
        lastname: user.lastname.clone(),
    };
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(user_id = %user.id, "admin logged in");

    Ok(Json(json!({ "success": true, "user": user })))
}

/// `POST /api/auth/logout`
async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    Ok(Json(json!({ "success": true })))
}

/// `POST /api/auth/register`
///
/// Phase one: make sure the email and phone are unused, then ask the
/// provider to deliver a code. Nothing but the pending-verification row is
/// written.
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = parse_email(&body.email)?;
    let phone = parse_phone(&body.phone)?;

    let users = UserRepository::new(state.pool());
    check_contact_points_free(&users, &email, &phone).await?;

    state.otp().send_code(&phone).await?;

    VerificationRepository::new(state.pool())
        .create(&email, &phone)
        .await?;

    tracing::info!(%email, "verification code sent");

    Ok(Json(
        json!({ "success": true, "message": "Verification code sent" }),
    ))
}

/// `POST /api/auth/register/verify`
///
/// Phase two: check the code with the provider and create the account.
/// There is no compensating transaction; if the insert fails after a
/// successful verify, the code is consumed and the client restarts the
/// flow.
async fn register_verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let data = body.data;
    data.validate().map_err(AppError::BadRequest)?;
    let email = parse_email(&data.email)?;
    let phone = parse_phone(&data.phone)?;

    let verifications = VerificationRepository::new(state.pool());
    let pending = verifications
        .find_pending(&email)
        .await?
        .ok_or_else(|| AppError::BadRequest("No pending verification for this email".to_owned()))?;
    if pending.phone != phone {
        return Err(AppError::BadRequest(
            "Phone number does not match the pending verification".to_owned(),
        ));
    }

    state.otp().verify_code(&phone, &data.code).await?;

    // The account data only arrives in phase two, so the uniqueness checks
    // run again before the insert.
    let users = UserRepository::new(state.pool());
    check_contact_points_free(&users, &email, &phone).await?;

    let password_hash = bcrypt::hash(&data.password, BCRYPT_COST)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

    let user = users
        .create(&NewUser {
            firstname: data.firstname.trim().to_owned(),
            lastname: data.lastname.trim().to_owned(),
            email,
            phone,
            address: data.address.trim().to_owned(),
            city: data.city.trim().to_owned(),
            zip: data.zip,
            country: data.country,
            password_hash,
        })
        .await?;

    verifications.consume(&user.email).await?;

    tracing::info!(user_id = %user.id, "account created");

    Ok(Json(
        json!({ "success": true, "message": "Account created successfully" }),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn data() -> RegistrationData {
        RegistrationData {
            firstname: "Awa".to_owned(),
            lastname: "Diop".to_owned(),
            email: "awa@example.com".to_owned(),
            phone: "+221771234567".to_owned(),
            password: "hunter22".to_owned(),
            address: "12 Rue des Manguiers".to_owned(),
            city: "Dakar".to_owned(),
            zip: None,
            country: Some("Senegal".to_owned()),
            code: "123456".to_owned(),
        }
    }

    #[test]
    fn test_valid_registration_data() {
        assert!(data().validate().is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let mut d = data();
        d.password = "abc".to_owned();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_blank_firstname_rejected() {
        let mut d = data();
        d.firstname = "  ".to_owned();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_verify_request_shape() {
        let json = serde_json::json!({
            "data": {
                "firstname": "Awa",
                "lastname": "Diop",
                "email": "awa@example.com",
                "phone": "+221771234567",
                "password": "hunter22",
                "address": "12 Rue des Manguiers",
                "city": "Dakar",
                "code": "123456"
            }
        });
        let parsed: VerifyRegistrationRequest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.data.code, "123456");
        assert_eq!(parsed.data.city, "Dakar");
        assert!(parsed.data.zip.is_none());
    }

    #[test]
    fn test_register_request_shape() {
        let json = serde_json::json!({
            "email": "awa@example.com",
            "phone": "+221771234567"
        });
        let parsed: RegisterRequest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.email, "awa@example.com");
        assert_eq!(parsed.phone, "+221771234567");
    }
}
