use actix_web::{http::StatusCode, test, web, App};
use serde_json::json;
use tempo_models::settings::Settings;
use tempo_web::{api, AppState};
use tokio::sync::OnceCell;

static SETTINGS: OnceCell<Settings> = OnceCell::const_new();

/// Storage bootstrap shared across tests; the process-wide connection pool
/// can only be installed once.
async fn settings() -> Settings {
    SETTINGS
        .get_or_init(|| async {
            let db_path = std::env::temp_dir()
                .join(format!("tempo-web-test-{}.db", std::process::id()));
            std::env::set_var("TEMPO__DB__SQLITE__PATH", &db_path);
            let settings = Settings::new("does-not-exist".into()).expect("load settings");
            tempo_storage::init(&settings).await.expect("init storage");
            settings
        })
        .await
        .clone()
}

macro_rules! protected_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState {
                    settings: settings().await,
                }))
                .configure(api::configure_protected_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn invalid_timesheet_body_beats_missing_id() {
    let app = protected_app!();

    let req = test::TestRequest::put()
        .uri("/timesheets/999999")
        .set_json(json!({ "hours": -2.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["errors"]["hours"].is_array());
}

#[actix_web::test]
async fn invalid_project_body_beats_missing_id() {
    let app = protected_app!();

    let req = test::TestRequest::put()
        .uri("/projects/999999")
        .set_json(json!({ "name": "x".repeat(256) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["errors"]["name"].is_array());
}

#[actix_web::test]
async fn missing_type_on_attribute_update_beats_missing_id() {
    let app = protected_app!();

    let req = test::TestRequest::put()
        .uri("/attributes/999999")
        .set_json(json!({ "name": "department" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"]["type"][0],
        json!("The type field is required.")
    );
}

#[actix_web::test]
async fn unknown_attribute_type_is_a_field_error() {
    let app = protected_app!();

    let req = test::TestRequest::post()
        .uri("/attributes")
        .set_json(json!({ "name": "weird", "type": "bogus" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"]["type"][0],
        json!("The selected type is invalid.")
    );
}
