//! Discord avatar-lookup proxy.
//!
//! Resolves the avatar URL for a catalog record's linked Discord account
//! via the Discord REST API, so the browser never needs a bot token.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Discord REST API base.
const DISCORD_API: &str = "https://discord.com/api/v10";

/// Discord CDN base for avatar images.
const DISCORD_CDN: &str = "https://cdn.discordapp.com";

/// Query parameters: the catalog record id (not the Discord id).
#[derive(Debug, Deserialize)]
pub struct AvatarQuery {
    pub id: Option<String>,
}

/// The slice of the Discord user object we consume.
#[derive(Debug, Deserialize)]
struct DiscordUser {
    id: String,
    avatar: Option<String>,
}

/// Avatar lookup response.
#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    #[serde(rename = "discordID")]
    pub discord_id: String,
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
    #[serde(rename = "avatarHash")]
    pub avatar_hash: Option<String>,
    #[serde(rename = "isAnimated")]
    pub is_animated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// `GET /api/v1/fetch/discord-avatar?id=<artId>`
pub async fn avatar(
    State(state): State<AppState>,
    Query(query): Query<AvatarQuery>,
) -> Result<Json<AvatarResponse>, ApiError> {
    let art_id: u64 = query
        .id
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("missing 'id' query parameter".to_string()))?
        .parse()
        .map_err(|_| ApiError::BadRequest("'id' must be a numeric art id".to_string()))?;

    let Some(token) = &state.config.discord_bot_token else {
        return Err(ApiError::Unauthorized);
    };

    let catalog = artfolio_core::Catalog::load(&state.config.data_file)?;
    let record = catalog
        .find(art_id)
        .ok_or_else(|| ApiError::NotFound(format!("artwork {art_id}")))?;

    if !record.uses_discord_pic() {
        return Err(ApiError::NotFound(format!(
            "artwork {art_id} has no linked Discord account"
        )));
    }
    let discord_id = record.discord_id.clone();

    let response = state
        .http
        .get(format!("{DISCORD_API}/users/{discord_id}"))
        .header("Authorization", format!("Bot {token}"))
        .send()
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    match response.status().as_u16() {
        404 => return Err(ApiError::NotFound(format!("unknown Discord user {discord_id}"))),
        429 => return Err(ApiError::RateLimited),
        s if !(200..300).contains(&s) => {
            return Err(ApiError::Upstream(format!("Discord API returned {s}")))
        }
        _ => {}
    }

    let user: DiscordUser = response
        .json()
        .await
        .map_err(|e| ApiError::Upstream(format!("malformed Discord response: {e}")))?;

    Ok(Json(build_response(&user)))
}

/// Build the proxy response from a Discord user object.
fn build_response(user: &DiscordUser) -> AvatarResponse {
    match &user.avatar {
        Some(hash) => {
            let is_animated = hash.starts_with("a_");
            let ext = if is_animated { "gif" } else { "png" };
            AvatarResponse {
                discord_id: user.id.clone(),
                avatar_url: format!(
                    "{DISCORD_CDN}/avatars/{}/{hash}.{ext}?size=256",
                    user.id
                ),
                avatar_hash: Some(hash.clone()),
                is_animated,
                note: None,
            }
        }
        None => AvatarResponse {
            discord_id: user.id.clone(),
            avatar_url: default_avatar_url(&user.id),
            avatar_hash: None,
            is_animated: false,
            note: Some("user has no custom avatar; default avatar returned".to_string()),
        },
    }
}

/// Discord's default avatar for users without a custom one, derived from
/// the snowflake: `(id >> 22) % 6`.
fn default_avatar_url(discord_id: &str) -> String {
    let index = discord_id
        .parse::<u64>()
        .map(|id| (id >> 22) % 6)
        .unwrap_or(0);
    format!("{DISCORD_CDN}/embed/avatars/{index}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_avatar_is_png() {
        let user = DiscordUser {
            id: "123456789012345678".to_string(),
            avatar: Some("deadbeef".to_string()),
        };
        let resp = build_response(&user);
        assert_eq!(
            resp.avatar_url,
            "https://cdn.discordapp.com/avatars/123456789012345678/deadbeef.png?size=256"
        );
        assert!(!resp.is_animated);
        assert!(resp.note.is_none());
    }

    #[test]
    fn animated_avatar_is_gif() {
        let user = DiscordUser {
            id: "123456789012345678".to_string(),
            avatar: Some("a_deadbeef".to_string()),
        };
        let resp = build_response(&user);
        assert!(resp.is_animated);
        assert!(resp.avatar_url.ends_with(".gif?size=256"));
    }

    #[test]
    fn missing_avatar_falls_back_to_default() {
        let user = DiscordUser {
            id: "123456789012345678".to_string(),
            avatar: None,
        };
        let resp = build_response(&user);
        assert!(resp.avatar_url.starts_with("https://cdn.discordapp.com/embed/avatars/"));
        assert!(resp.note.is_some());
        assert!(resp.avatar_hash.is_none());
    }

    #[test]
    fn default_avatar_index_is_stable() {
        // (123456789012345678 >> 22) % 6 == 29433822240 % 6
        let url = default_avatar_url("123456789012345678");
        assert_eq!(url, format!("https://cdn.discordapp.com/embed/avatars/{}.png", (123456789012345678u64 >> 22) % 6));
    }

    #[test]
    fn response_uses_wire_field_names() {
        let resp = build_response(&DiscordUser {
            id: "42".to_string(),
            avatar: Some("hash".to_string()),
        });
        let json = serde_json::to_value(&resp).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("discordID"));
        assert!(obj.contains_key("avatarURL"));
        assert!(obj.contains_key("avatarHash"));
        assert!(obj.contains_key("isAnimated"));
        assert!(!obj.contains_key("note"));
    }
}
