//! Password-reset API handlers.
//!
//! The forgot-password endpoint answers identically whether or not the
//! email matches an account; token delivery happens out of band.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::Result;
use crate::services::auth::PasswordResetService;
use crate::state::AppState;

/// Forgot-password payload.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordPayload {
    pub email: String,
}

/// Reset-password payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordPayload {
    pub token: String,
    pub new_password: String,
}

/// Issue a reset token for the account with this email.
#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<Json<Value>> {
    let issued = PasswordResetService::new(state.pool())
        .request_reset(payload.email.trim())
        .await?
        .is_some();

    // Same response either way; only the log distinguishes the cases
    tracing::debug!(issued, "Password reset requested");

    Ok(Json(json!({
        "message": "If that account exists, a reset link has been sent"
    })))
}

/// Complete a password reset with a previously issued token.
#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<Json<Value>> {
    PasswordResetService::new(state.pool())
        .reset_password(&payload.token, &payload.new_password)
        .await?;

    Ok(Json(json!({ "message": "Password updated" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_payload_accepts_camel_case() {
        let payload: ResetPasswordPayload = serde_json::from_value(json!({
            "token": "t-123",
            "newPassword": "longenoughpassword",
        }))
        .expect("deserialize");

        assert_eq!(payload.token, "t-123");
        assert_eq!(payload.new_password, "longenoughpassword");
    }

    #[test]
    fn test_forgot_payload_requires_email() {
        let payload: ForgotPasswordPayload =
            serde_json::from_value(json!({ "email": "ana@example.com" })).expect("deserialize");
        assert_eq!(payload.email, "ana@example.com");

        assert!(serde_json::from_value::<ForgotPasswordPayload>(json!({})).is_err());
    }
}
