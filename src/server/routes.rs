// src/server/routes.rs
pub mod health {
    use rocket::{get, serde::json::Json};
    use serde_json::{json, Value};

    #[get("/health")]
    pub async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "service": "leadflow-api"
        }))
    }

    #[get("/")]
    pub async fn index() -> Json<Value> {
        Json(json!({
            "name": "LeadFlow API",
            "version": "0.1.0",
            "description": "Lead generation jobs: directory search plus website contact enrichment",
            "endpoints": {
                "health": "/api/health",
                "scrape": "/api/scrape",
                "status": "/api/status/<task_id>",
                "download": "/download/<task_id>.csv"
            }
        }))
    }
}

pub mod frontend {
    use rocket::fs::NamedFile;
    use rocket::get;
    use std::path::{Path, PathBuf};

    /// Serve a built frontend asset if one matches, otherwise fall back to
    /// index.html so client-side routing keeps working.
    #[get("/<path..>", rank = 20)]
    pub async fn spa_fallback(path: PathBuf) -> Option<NamedFile> {
        let file = Path::new("static").join(&path);
        if file.is_file() {
            return NamedFile::open(file).await.ok();
        }
        NamedFile::open("static/index.html").await.ok()
    }
}
