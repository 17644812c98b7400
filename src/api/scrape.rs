// src/api/scrape.rs
use crate::models::{ScrapeAccepted, ScrapeRequest, ScrapeStatus};
use crate::server::ServerState;
use rocket::response::status::NotFound;
use rocket::{get, post, serde::json::Json, State};
use serde_json::{json, Value};
use uuid::Uuid;

/// Accept a scrape job. Always returns a task id immediately; the job runs
/// in the background and failures surface through the status endpoint.
#[post("/scrape", data = "<request>")]
pub async fn start_scrape(
    state: &State<ServerState>,
    request: Json<ScrapeRequest>,
) -> Json<ScrapeAccepted> {
    let task_id = state
        .runner
        .submit(&request.query, request.max_results)
        .await;
    Json(ScrapeAccepted { task_id })
}

#[get("/status/<task_id>")]
pub async fn get_status(
    state: &State<ServerState>,
    task_id: Uuid,
) -> Result<Json<ScrapeStatus>, NotFound<Json<Value>>> {
    match state.store.get(task_id).await {
        Some(job) => Ok(Json(job.into())),
        None => Err(NotFound(Json(json!({ "error": "task not found" })))),
    }
}
