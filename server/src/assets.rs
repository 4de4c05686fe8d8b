//! Serves the compiled console embedded in the binary.

use actix_web::{web, HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use log::debug;
use mime_guess::from_path;

pub static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

const INDEX: &str = "index.html";

/// The bundle served by [`serve_embedded`].
#[derive(Clone, Copy)]
pub struct Assets(pub &'static Dir<'static>);

/// Runtime settings for the console, read by it at startup.
#[derive(Clone)]
pub struct ConsoleConfig {
    pub api_domain: String,
}

pub async fn config_json(config: web::Data<ConsoleConfig>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "api_domain": config.api_domain }))
}

/// Static files by path; anything else is a client-side route and gets
/// `index.html`.
pub async fn serve_embedded(req: HttpRequest, assets: web::Data<Assets>) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { INDEX } else { path };

    match assets.0.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match assets.0.get_file(INDEX) {
            Some(index) => {
                debug!("{} -> {INDEX}", req.path());
                HttpResponse::Ok()
                    .content_type("text/html; charset=utf-8")
                    .body(index.contents().to_vec())
            }
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/config.json", web::get().to(config_json))
        .default_service(web::route().to(serve_embedded));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use include_dir::{DirEntry, File};

    static BUNDLE: Dir = Dir::new(
        "",
        &[
            DirEntry::File(File::new(INDEX, b"<html>console</html>")),
            DirEntry::File(File::new("app.js", b"run()")),
        ],
    );

    fn app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Assets(&BUNDLE)))
            .app_data(web::Data::new(ConsoleConfig {
                api_domain: "https://swiple.example.com/api/v1".to_string(),
            }))
            .configure(configure)
    }

    #[actix_web::test]
    async fn serves_files_with_their_mime_type() {
        let app = test::init_service(app()).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/app.js").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers().get("content-type").and_then(|v| v.to_str().ok()).unwrap_or_default();
        assert!(content_type.contains("javascript"));
        assert_eq!(test::read_body(resp).await, "run()");
    }

    #[actix_web::test]
    async fn client_routes_fall_back_to_index() {
        let app = test::init_service(app()).await;
        let req = test::TestRequest::get().uri("/dataset/home?dataset-id=42").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "<html>console</html>");
    }

    #[actix_web::test]
    async fn publishes_api_domain() {
        let app = test::init_service(app()).await;
        let req = test::TestRequest::get().uri("/config.json").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({ "api_domain": "https://swiple.example.com/api/v1" }));
    }
}
