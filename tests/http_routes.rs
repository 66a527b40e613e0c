mod common;

use axum::http::{header, StatusCode};
use common::{app, body_json, body_string, get, site, write_site};
use portfolio_lib::settings::Mode;
use rstest::rstest;
use std::fs;

#[rstest]
#[case("en", "Backend Developer")]
#[case("pt-BR", "Desenvolvedora Backend")]
#[tokio::test]
async fn profile_endpoint_serves_each_locale(#[case] tag: &str, #[case] title: &str) {
    let (_dir, app) = site(Mode::Production);

    let response = get(&app, &format!("/api/data/{}/profile", tag)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));

    let json = body_json(response).await;
    assert_eq!(json["name"], "Ana Souza");
    assert_eq!(json["title"], title);
    assert_eq!(json["contact"]["email"], "ana@example.com");
}

#[rstest]
#[case("en")]
#[case("pt-BR")]
#[tokio::test]
async fn profile_endpoint_degrades_to_503_when_content_is_missing(#[case] tag: &str) {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());
    fs::remove_dir_all(dir.path().join("data").join(tag)).unwrap();
    let app = app(dir.path(), Mode::Production);

    let response = get(&app, &format!("/api/data/{}/profile", tag)).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
    assert!(json["message"].as_str().unwrap().contains(tag));
}

#[tokio::test]
async fn malformed_content_only_disables_its_locale() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());
    fs::write(dir.path().join("data").join("en").join("ui.yaml"), "- not\n- a mapping\n").unwrap();
    let app = app(dir.path(), Mode::Production);

    let response = get(&app, "/api/data/en/profile").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("mapping"));

    let response = get(&app, "/api/data/pt-BR/profile").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn numeric_and_blank_scalars_keep_the_locale_online() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());
    let en = dir.path().join("data").join("en");
    fs::write(en.join("education.yaml"), "degrees:\n  - course: Computer Science\n    period: 2019\n").unwrap();
    fs::write(
        en.join("profile.yaml"),
        "name: Ana Souza\ntitle: Backend Developer\nsummary:\ncontact:\n  email: ana@example.com\n  phone: \"\"\n  linkedin: l\n  github: g\n",
    )
    .unwrap();
    let app = app(dir.path(), Mode::Production);

    let json = body_json(get(&app, "/api/data/en/education").await).await;
    assert_eq!(json["degrees"][0]["period"], "2019");

    let json = body_json(get(&app, "/api/data/en/profile").await).await;
    assert_eq!(json["contact"]["phone"], "");
    assert!(json.get("summary").is_none());

    let html = body_string(get(&app, "/en").await).await;
    assert!(html.contains("\"jobTitle\":\"Backend Developer\""));
    assert!(!html.contains("telephone"));
}

#[rstest]
#[case("skills", "categories")]
#[case("experience", "positions")]
#[case("education", "degrees")]
#[case("ui", "toggle_theme")]
#[tokio::test]
async fn other_sections_are_served_too(#[case] section: &str, #[case] key: &str) {
    let (_dir, app) = site(Mode::Production);
    let response = get(&app, &format!("/api/data/en/{}", section)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json.get(key).is_some(), "{} missing from {}", key, json);
}

#[rstest]
#[case("/api/data/fr/profile")]
#[case("/api/data/EN/profile")]
#[case("/api/data/en/projects")]
#[case("/nope")]
#[case("/public/missing.css")]
#[case("/public/../CNAME")]
#[case("/public/img/../../CNAME")]
#[tokio::test]
async fn unknown_paths_are_404(#[case] uri: &str) {
    let (_dir, app) = site(Mode::Production);
    let response = get(&app, uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "Not Found");
}

#[rstest]
#[case(Mode::Development, "development")]
#[case(Mode::Production, "production")]
#[tokio::test]
async fn health_reports_ok_with_timestamp(#[case] mode: Mode, #[case] label: &str) {
    let (_dir, app) = site(mode);
    let response = get(&app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["mode"], label);
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));
}

#[tokio::test]
async fn health_is_ok_even_without_content() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path(), Mode::Production);
    let json = body_json(get(&app, "/api/health").await).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn index_html_redirects_permanently() {
    let (_dir, app) = site(Mode::Production);
    let response = get(&app, "/index.html").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[rstest]
#[case("/public/css/site.css", "text/css; charset=utf-8")]
#[case("/public/img/avatar.png", "image/png")]
#[case("/public/resume.xyz", "application/octet-stream")]
#[tokio::test]
async fn public_assets_carry_extension_content_type(#[case] uri: &str, #[case] content_type: &str) {
    let (_dir, app) = site(Mode::Production);
    let response = get(&app, uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], content_type);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=3600");
}

#[tokio::test]
async fn development_assets_are_not_cached() {
    let (_dir, app) = site(Mode::Development);
    let response = get(&app, "/public/css/site.css").await;
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    assert_eq!(body_string(response).await, "body { margin: 0; }");
}

#[tokio::test]
async fn cname_is_served_as_text_when_present() {
    let (dir, app) = site(Mode::Production);
    let response = get(&app, "/CNAME").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    assert_eq!(body_string(response).await, "example.com\n");

    fs::remove_file(dir.path().join("CNAME")).unwrap();
    let response = get(&app, "/CNAME").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/", "pt-BR", "Desenvolvedora Backend")]
#[case("/en", "en", "Backend Developer")]
#[case("/en/", "en", "Backend Developer")]
#[tokio::test]
async fn pages_are_prerendered_per_locale(#[case] uri: &str, #[case] tag: &str, #[case] title: &str) {
    let (_dir, app) = site(Mode::Production);
    let response = get(&app, uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = body_string(response).await;
    assert!(html.contains(&format!("<html lang=\"{}\" class=\"scroll-smooth\">", tag)));
    assert!(html.contains(&format!("\"jobTitle\":\"{}\"", title)));
    assert!(html.contains("\"@type\":\"ProfilePage\""));
}

#[tokio::test]
async fn production_pages_come_from_the_startup_render() {
    let (dir, app) = site(Mode::Production);
    fs::write(dir.path().join("pages").join("index.html"), "<html><body>edited</body></html>").unwrap();
    let html = body_string(get(&app, "/").await).await;
    assert!(!html.contains("edited"));
}

#[tokio::test]
async fn development_pages_are_read_on_each_request() {
    let (dir, app) = site(Mode::Development);
    fs::write(dir.path().join("pages").join("index.html"), "<html><body>edited</body></html>").unwrap();

    let response = get(&app, "/").await;
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    let html = body_string(response).await;
    assert!(html.contains("edited"));
    assert!(html.contains("<html lang=\"pt-BR\">"));
}

#[tokio::test]
async fn missing_page_template_answers_503() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());
    fs::remove_file(dir.path().join("pages").join("en").join("index.html")).unwrap();
    let app = app(dir.path(), Mode::Production);

    assert_eq!(get(&app, "/en").await.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(get(&app, "/").await.status(), StatusCode::OK);
}
