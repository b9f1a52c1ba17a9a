//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the activity endpoints, the health probes, and the
//! schemas they exchange. The document backs Swagger UI in debug builds and
//! is exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::ports::ActivityResponse;
use crate::domain::{ActivityType, Error, ErrorCode};
use crate::inbound::http::activities::TrackActivityBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Activity service API",
        description = "Records fitness activities, notifies downstream analysis, and serves read-back queries."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::activities::track_activity,
        crate::inbound::http::activities::list_activities,
        crate::inbound::http::activities::get_activity,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ActivityResponse, TrackActivityBody, ActivityType, Error, ErrorCode)),
    tags(
        (name = "activities", description = "Activity ingestion and queries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
