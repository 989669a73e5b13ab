//! Social-media link API handlers.

use axum::{
    Json,
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;

use bazaar_core::SocialLinkId;

use crate::db::social_links::{SocialLink, SocialLinkRepository};
use crate::error::{AppError, Result};
use crate::routes::api::Envelope;
use crate::state::AppState;

/// Social link payload.
#[derive(Debug, Deserialize)]
pub struct SocialLinkPayload {
    pub platform: String,
    pub url: String,
}

/// Link id query parameter for delete.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: SocialLinkId,
}

/// Validate a link payload, returning normalized platform and URL.
fn validate_payload(payload: &SocialLinkPayload) -> std::result::Result<(&str, &str), AppError> {
    let platform = payload.platform.trim();
    if platform.is_empty() {
        return Err(AppError::BadRequest("Platform is required".to_string()));
    }

    let url = payload.url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::BadRequest(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    Ok((platform, url))
}

/// List every configured link.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SocialLink>>> {
    let links = SocialLinkRepository::new(state.pool()).list_all().await?;

    Ok(Json(links))
}

/// Insert or replace the link for a platform.
#[instrument(skip(state))]
pub async fn upsert(
    State(state): State<AppState>,
    Json(payload): Json<SocialLinkPayload>,
) -> Result<Response> {
    let (platform, url) = validate_payload(&payload)?;

    let link = SocialLinkRepository::new(state.pool())
        .upsert(platform, url)
        .await?;

    Ok(Envelope::ok("Social link saved", link))
}

/// Delete a link by id, returning the deleted row.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    let link = SocialLinkRepository::new(state.pool()).delete(query.id).await?;

    Ok(Envelope::ok("Social link deleted", link))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(platform: &str, url: &str) -> SocialLinkPayload {
        SocialLinkPayload {
            platform: platform.to_owned(),
            url: url.to_owned(),
        }
    }

    #[test]
    fn test_validate_payload_trims_and_accepts_https() {
        let p = payload(" instagram ", " https://instagram.com/bazaar ");
        let (platform, url) = validate_payload(&p).expect("valid");
        assert_eq!(platform, "instagram");
        assert_eq!(url, "https://instagram.com/bazaar");
    }

    #[test]
    fn test_validate_payload_rejects_bad_input() {
        assert!(validate_payload(&payload("", "https://x.com")).is_err());
        assert!(validate_payload(&payload("x", "ftp://x.com")).is_err());
        assert!(validate_payload(&payload("x", "javascript:alert(1)")).is_err());
    }
}
