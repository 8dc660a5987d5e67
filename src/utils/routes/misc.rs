use std::fs;
use std::path::{Component, Path, PathBuf};

use actix_web::http::Method;
use actix_web::{get, web, HttpRequest, HttpResponse};
use chrono::Utc;

use crate::state::Portal;
use crate::utils::enums::Outcome;
use crate::utils::structures::Reply;

#[get("/health_check")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp()
    }))
}

/// Serves the bundled front end. Paths without a file behind them get
/// `index.html` so client-side routes survive a reload.
pub async fn serve_static(req: HttpRequest, portal: web::Data<Portal>) -> HttpResponse {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return not_found();
    }
    let Some(relative) = safe_relative(req.path()) else {
        tracing::warn!(path = %req.path(), "refused static path");
        return not_found();
    };

    let requested = portal.static_dir.join(&relative);
    let filepath = if requested.is_file() {
        requested
    } else if relative.extension().is_none() {
        portal.static_dir.join("index.html")
    } else {
        return not_found();
    };

    match fs::read(&filepath) {
        Ok(file_content) => HttpResponse::Ok()
            .content_type(content_type(&filepath))
            .body(file_content),
        Err(e) => {
            tracing::debug!(path = %filepath.display(), error = %e, "static file unavailable");
            not_found()
        }
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(Reply::text(Outcome::NotFound, "File not found"))
}

/// Request path as a relative file path, or None if it tries to leave the
/// static root.
fn safe_relative(path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(relative)
}

fn content_type(filepath: &Path) -> &'static str {
    match filepath.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_components_are_refused() {
        assert_eq!(safe_relative("/main.js"), Some(PathBuf::from("main.js")));
        assert_eq!(safe_relative("/assets/./logo.png"), Some(PathBuf::from("assets/logo.png")));
        assert_eq!(safe_relative("/"), Some(PathBuf::new()));
        assert_eq!(safe_relative("/../secrets.env"), None);
        assert_eq!(safe_relative("/assets/../../etc/passwd"), None);
    }

    #[test]
    fn known_extensions_get_their_mime_type() {
        assert_eq!(content_type(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("main.js")), "application/javascript");
        assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
    }
}
