//! Visitor preferences stored in the session.

use axum::Json;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Result;
use crate::models::{Theme, session_keys};

/// Theme preference payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ThemePreference {
    pub theme: Theme,
}

/// Current theme (light unless changed).
pub async fn get_theme(session: Session) -> Result<Json<ThemePreference>> {
    let theme = session
        .get::<Theme>(session_keys::THEME)
        .await?
        .unwrap_or_default();
    Ok(Json(ThemePreference { theme }))
}

/// Set the theme.
pub async fn set_theme(
    session: Session,
    Json(preference): Json<ThemePreference>,
) -> Result<Json<ThemePreference>> {
    session.insert(session_keys::THEME, preference.theme).await?;
    Ok(Json(preference))
}
