#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use portfolio_lib::server::{router, AppState};
use portfolio_lib::settings::{Mode, Settings};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR" class="scroll-smooth">
<head>
<title>Portfolio</title>
<script type="application/ld+json" id="schema-org-data"></script>
</head>
<body><main id="app"></main></body>
</html>
"#;

pub fn write_locale(data_dir: &Path, tag: &str, title: &str, course: &str) {
    let dir = data_dir.join(tag);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("profile.yaml"),
        format!(
            "name: Ana Souza\ntitle: {}\ncontact:\n  email: ana@example.com\n  phone: \"+55 11 90000-0000\"\n  linkedin: https://www.linkedin.com/in/ana\n  github: https://github.com/ana\n",
            title
        ),
    )
    .unwrap();
    fs::write(dir.join("skills.yaml"), "categories:\n  - name: Backend\n    items: [Rust, PHP]\n").unwrap();
    fs::write(dir.join("experience.yaml"), "positions:\n  - company: Acme\n    role: Engineer\n").unwrap();
    fs::write(dir.join("education.yaml"), format!("degrees:\n  - course: {}\n", course)).unwrap();
    fs::write(dir.join("ui.yaml"), "toggle_theme: Theme\n").unwrap();
}

/// A complete site tree: content for both locales, both pages, a few public
/// assets and a CNAME file.
pub fn write_site(root: &Path) {
    let data = root.join("data");
    write_locale(&data, "en", "Backend Developer", "Computer Science");
    write_locale(&data, "pt-BR", "Desenvolvedora Backend", "Ciência da Computação");

    let pages = root.join("pages");
    fs::create_dir_all(pages.join("en")).unwrap();
    fs::write(pages.join("index.html"), PAGE_TEMPLATE).unwrap();
    fs::write(pages.join("en").join("index.html"), PAGE_TEMPLATE).unwrap();

    let public = root.join("public");
    fs::create_dir_all(public.join("css")).unwrap();
    fs::create_dir_all(public.join("img")).unwrap();
    fs::write(public.join("css").join("site.css"), "body { margin: 0; }").unwrap();
    fs::write(public.join("img").join("avatar.png"), [0x89, b'P', b'N', b'G']).unwrap();
    fs::write(public.join("resume.xyz"), "??").unwrap();

    fs::write(root.join("CNAME"), "example.com\n").unwrap();
}

pub fn settings(root: &Path, mode: Mode) -> Settings {
    Settings {
        mode,
        host: "127.0.0.1".to_string(),
        port: 3000,
        root: root.to_path_buf(),
    }
}

pub fn app(root: &Path, mode: Mode) -> Router {
    router(Arc::new(AppState::load(settings(root, mode))))
}

pub fn site(mode: Mode) -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());
    let app = app(dir.path(), mode);
    (dir, app)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
