//! End-to-end HTTP coverage for the activity endpoints backed by in-memory
//! adapters.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use activity_service::Trace;
use activity_service::domain::ports::{ActivityEventRoute, FixtureUserValidator};
use activity_service::domain::{ActivityService, ActivityServicePorts, TRACE_ID_HEADER};
use activity_service::inbound::http::activities::{
    USER_ID_HEADER, get_activity, json_config, list_activities, track_activity,
};
use activity_service::inbound::http::state::HttpState;
use activity_service::outbound::memory::InMemoryActivityRepository;
use activity_service::outbound::queue::LoggingActivityEventPublisher;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn state() -> HttpState {
    let service = ActivityService::new(
        ActivityServicePorts {
            validator: Arc::new(FixtureUserValidator),
            repository: Arc::new(InMemoryActivityRepository::new(Arc::new(DefaultClock))),
            publisher: Arc::new(LoggingActivityEventPublisher),
        },
        ActivityEventRoute::new("fitness.exchange", "activity.tracking"),
    );
    HttpState::from_service(Arc::new(service))
}

fn body(user: &str, activity_type: &str, duration: i32) -> Value {
    json!({
        "userId": user,
        "type": activity_type,
        "duration": duration,
        "caloriesBurned": duration * 10,
        "startTime": "2026-03-01T07:30:00Z",
        "additionalMetrics": { "distanceKm": 5.2 }
    })
}

#[rstest]
#[actix_web::test]
async fn tracked_activities_are_readable_by_id_and_owner(state: HttpState) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .service(track_activity)
                    .service(list_activities)
                    .service(get_activity),
            ),
    )
    .await;

    let mut tracked = Vec::new();
    for (user, activity_type, duration) in
        [("u1", "running", 30), ("u2", "yoga", 45), ("u1", "cycling", 60)]
    {
        let request = actix_test::TestRequest::post()
            .uri("/api/activities")
            .set_json(body(user, activity_type, duration))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
        let created: Value = actix_test::read_body_json(response).await;
        tracked.push(created);
    }

    let first = &tracked[0];
    assert_eq!(first["userId"], "u1");
    assert_eq!(first["type"], "running");
    assert_eq!(first["additionalMetrics"], json!({ "distanceKm": 5.2 }));
    assert_eq!(first["createdAt"], first["updatedAt"]);

    let id = first["id"].as_str().expect("id is a string");
    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/activities/{id}"))
        .to_request();
    let fetched: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(&fetched, first);

    let request = actix_test::TestRequest::get()
        .uri("/api/activities")
        .insert_header((USER_ID_HEADER, "u1"))
        .to_request();
    let listed: Vec<Value> = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(listed, vec![tracked[0].clone(), tracked[2].clone()]);
}

#[rstest]
#[actix_web::test]
async fn unknown_activity_is_not_found_with_trace_id(state: HttpState) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api").service(get_activity)),
    )
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/activities/00000000-0000-0000-0000-00000000ffff")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["code"], "not_found");
    assert_eq!(payload["traceId"], header.as_str());
}
