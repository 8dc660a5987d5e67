mod common;

use std::fs;
use std::path::PathBuf;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use uuid::Uuid;

use common::test_portal;
use job_portal::config::Settings;
use job_portal::routes;

fn bundle_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("job-portal-static-{}", Uuid::new_v4()));
    fs::create_dir_all(dir.join("assets")).unwrap();
    fs::write(dir.join("index.html"), "<html>portal</html>").unwrap();
    fs::write(dir.join("assets").join("main.js"), "console.log(1)").unwrap();
    dir
}

#[actix_web::test]
async fn bundle_files_and_client_routes_are_served() {
    let dir = bundle_dir();
    let t = test_portal(Settings {
        static_dir: dir.to_string_lossy().into_owned(),
        ..Settings::default()
    });
    let app = test::init_service(App::new().configure(routes(t.portal.clone()))).await;

    let req = test::TestRequest::get().uri("/assets/main.js").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/javascript"
    );
    assert_eq!(test::read_body(resp).await, "console.log(1)");

    let req = test::TestRequest::get().uri("/careers/apply").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "<html>portal</html>");

    let req = test::TestRequest::get().uri("/assets/missing.css").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post().uri("/careers/apply").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    fs::remove_dir_all(dir).unwrap();
}
