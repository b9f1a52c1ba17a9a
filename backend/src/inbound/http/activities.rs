//! Activity HTTP handlers.
//!
//! ```text
//! POST /api/activities
//! GET  /api/activities            (X-User-ID header)
//! GET  /api/activities/{activityId}
//! ```

use actix_web::{HttpRequest, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::{ActivityResponse, TrackActivityRequest};
use crate::domain::{ActivityId, ActivityType, AdditionalMetrics, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, malformed_body_error, missing_field_error, parse_user_id,
};

/// Header naming the user whose activities are listed.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// Request payload for recording an activity.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackActivityBody {
    #[schema(example = "u1")]
    pub user_id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    #[schema(example = 30)]
    pub duration: i32,
    #[schema(example = 300)]
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub additional_metrics: AdditionalMetrics,
}

impl TryFrom<TrackActivityBody> for TrackActivityRequest {
    type Error = Error;

    fn try_from(body: TrackActivityBody) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: parse_user_id(&body.user_id, FieldName::new("userId"))?,
            activity_type: body.activity_type,
            duration: body.duration,
            calories_burned: body.calories_burned,
            start_time: body.start_time,
            additional_metrics: body.additional_metrics,
        })
    }
}

/// JSON extractor configuration reporting undecodable bodies as
/// `invalid_request` errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| malformed_body_error(err).into())
}

/// Record a new activity for a user.
#[utoipa::path(
    post,
    path = "/api/activities",
    request_body = TrackActivityBody,
    responses(
        (status = 200, description = "Activity recorded", body = ActivityResponse),
        (status = 400, description = "Malformed request or invalid user", body = Error),
        (status = 503, description = "Identity service or store unavailable", body = Error)
    ),
    tags = ["activities"],
    operation_id = "trackActivity"
)]
#[post("/activities")]
pub async fn track_activity(
    state: web::Data<HttpState>,
    payload: web::Json<TrackActivityBody>,
) -> ApiResult<web::Json<ActivityResponse>> {
    let request = TrackActivityRequest::try_from(payload.into_inner())?;
    let response = state.activities.track(request).await?;
    Ok(web::Json(response))
}

/// List every activity recorded for the user named in `X-User-ID`.
#[utoipa::path(
    get,
    path = "/api/activities",
    params(
        ("X-User-ID" = String, Header, description = "Owning user identifier")
    ),
    responses(
        (status = 200, description = "Activities in store order", body = [ActivityResponse]),
        (status = 400, description = "Missing or blank user header", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["activities"],
    operation_id = "listActivities"
)]
#[get("/activities")]
pub async fn list_activities(
    state: web::Data<HttpState>,
    request: HttpRequest,
) -> ApiResult<web::Json<Vec<ActivityResponse>>> {
    let field = FieldName::new(USER_ID_HEADER);
    let raw = request
        .headers()
        .get(USER_ID_HEADER)
        .ok_or_else(|| missing_field_error(field))?
        .to_str()
        .map_err(|_| Error::invalid_request(format!("{USER_ID_HEADER} must be valid ASCII")))?;
    let user_id = parse_user_id(raw, field)?;

    let activities = state.activities_query.list_by_user(&user_id).await?;
    Ok(web::Json(activities))
}

/// Fetch one activity by identifier.
///
/// Identifiers that are not UUIDs cannot name a stored activity and are
/// reported as not found.
#[utoipa::path(
    get,
    path = "/api/activities/{activityId}",
    params(
        ("activityId" = String, Path, description = "Activity identifier")
    ),
    responses(
        (status = 200, description = "Activity found", body = ActivityResponse),
        (status = 404, description = "Activity not found", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["activities"],
    operation_id = "getActivity"
)]
#[get("/activities/{activity_id}")]
pub async fn get_activity(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActivityResponse>> {
    let raw = path.into_inner();
    let activity_id = raw.parse::<ActivityId>().map_err(|err| {
        debug!(activity_id = %raw, error = %err, "unparseable activity id");
        Error::not_found(format!("activity {raw} not found"))
    })?;

    let activity = state.activities_query.get_by_id(&activity_id).await?;
    Ok(web::Json(activity))
}

#[cfg(test)]
#[path = "activities_tests.rs"]
mod tests;
