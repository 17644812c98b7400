use crate::api;
use crate::config::Config;
use crate::jobs::{JobRunner, JobStore};
use rocket::fs::FileServer;
use rocket::{routes, Build, Rocket};
use std::path::Path;
use std::sync::Arc;

pub mod routes;

pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn JobStore>,
    pub runner: Arc<JobRunner>,
}

pub fn build_rocket(
    config: Config,
    store: Arc<dyn JobStore>,
    runner: Arc<JobRunner>,
) -> Rocket<Build> {
    let results_dir = config.output.directory.clone();
    let state = ServerState {
        config,
        store,
        runner,
    };

    let mut rocket = rocket::build()
        .manage(state)
        .mount(
            "/api",
            routes![
                routes::health::health_check,
                routes::health::index,
                api::start_scrape,
                api::get_status,
            ],
        )
        .mount("/download", FileServer::from(results_dir));

    // Frontend bundle, present only in container deployments.
    if Path::new("static").exists() {
        rocket = rocket
            .mount("/assets", FileServer::from("static/assets"))
            .mount("/", routes![routes::frontend::spa_fallback]);
    }

    rocket
}
