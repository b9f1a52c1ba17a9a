//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::{ServerConfig, StartupError};

use state_builders::build_http_state;

use std::future::Future;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use activity_service::Trace;
#[cfg(debug_assertions)]
use activity_service::doc::ApiDoc;
use activity_service::inbound::http::activities::{
    get_activity, json_config, list_activities, track_activity,
};
use activity_service::inbound::http::health::{HealthState, live, ready};
use activity_service::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(track_activity)
        .service(list_activities)
        .service(get_activity);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the health state and configuration.
///
/// Adapters are built once and shared by every worker. Readiness is marked
/// once the listener is bound. Actix's own signal handling is disabled;
/// pair the server with [`drain_on`] so liveness fails before draining.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);

    #[cfg(feature = "metrics")]
    let prometheus = match config.prometheus.clone() {
        Some(prometheus) => prometheus,
        None => metrics::build_metrics()?,
    };

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .disable_signals()
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Wait for `shutdown`, fail the liveness probe, then stop the server
/// gracefully.
pub async fn drain_on<F>(shutdown: F, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    shutdown.await;
    health_state.mark_unhealthy();
    info!("shutdown requested; draining in-flight requests");
    handle.stop(true).await;
}

/// Resolve on Ctrl-C, or on SIGTERM where the platform has it.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(error) => warn!(%error, "SIGTERM handler unavailable; waiting for Ctrl-C"),
        }
    }

    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "Ctrl-C handler unavailable; shutdown needs an external stop");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::http::StatusCode;
    use actix_web::test;
    use activity_service::domain::TRACE_ID_HEADER;
    use activity_service::domain::ports::ActivityEventRoute;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    fn fallback_config() -> ServerConfig {
        ServerConfig::new(
            "127.0.0.1:0".parse().expect("literal address"),
            ActivityEventRoute::new("fitness.exchange", "activity.tracking"),
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn wired_app_tracks_and_reads_back_activity() {
        let config = fallback_config();
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            build_http_state(&config),
        ))
        .await;

        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/activities")
                .set_json(json!({
                    "userId": "u1",
                    "type": "swimming",
                    "duration": 40,
                    "caloriesBurned": 350,
                    "startTime": "2026-03-01T06:00:00Z",
                    "additionalMetrics": { "laps": 32 }
                }))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::OK);
        assert!(created.headers().contains_key(TRACE_ID_HEADER));
        let created: Value = test::read_body_json(created).await;
        let id = created["id"].as_str().expect("generated id").to_owned();

        let fetched = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/activities/{id}"))
                .to_request(),
        )
        .await;
        assert_eq!(fetched.status(), StatusCode::OK);
        let fetched: Value = test::read_body_json(fetched).await;
        assert_eq!(fetched, created);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_server_marks_ready_once_bound() {
        let health_state = web::Data::new(HealthState::new());

        let server =
            create_server(health_state.clone(), fallback_config()).expect("server binds");
        let handle = server.handle();
        actix_web::rt::spawn(server);

        assert!(health_state.is_ready());
        handle.stop(true).await;
    }

    #[rstest]
    #[actix_web::test]
    async fn draining_fails_liveness_and_stops_the_server() {
        let health_state = web::Data::new(HealthState::new());
        let server =
            create_server(health_state.clone(), fallback_config()).expect("server binds");
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);
        assert!(health_state.is_alive());

        drain_on(std::future::ready(()), health_state.clone(), handle).await;

        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server exits cleanly");
    }
}
