//! Backend of the job recruitment portal.
//!
//! Admins post jobs, candidates apply to them, and admins then shortlist or
//! reject each application, which mails the candidate. Everything lives in
//! an embedded document store; see [`data::database`].
//!
//! All routes sit under `/admin` and answer with a [`Reply`](utils::structures::Reply):
//! a tagged `status` next to the human-readable `message` the front end shows.
//! Domain refusals (unknown job, duplicate username, wrong password) are
//! ordinary 200 replies; only store and internal failures turn into a 500.
//!
//! With `REQUIRE_TOKEN=true` every route except job listing, job search,
//! applying and logging in needs a `Bearer` token from `/admin/loginAdmin`.
//! `/admin/addAdmin` stays open until the first admin account exists.

use std::io;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::{self, from_fn, Condition};
use actix_web::{error as actix_error, web, App, HttpResponse, HttpServer};
use tracing::info;

pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod utils;

use config::Settings;
use state::Portal;
use utils::enums::Outcome;
use utils::middleware::token::{require_token, require_token_after_first_admin};
use utils::routes::{accounts, applications, jobs, misc, shortlist};
use utils::structures::Reply;

/// Registers every portal route plus the shared state they read.
pub fn routes(portal: web::Data<Portal>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let token_required = portal.require_token;

        cfg.app_data(portal)
            .app_data(json_config())
            .service(misc::health_check)
            .service(
                web::scope("/admin")
                    .service(jobs::list_jobs)
                    .service(jobs::search_jobs)
                    .service(applications::save_application)
                    .service(accounts::login_admin)
                    .service(
                        web::resource("/addAdmin")
                            .wrap(Condition::new(
                                token_required,
                                from_fn(require_token_after_first_admin),
                            ))
                            .route(web::post().to(accounts::add_admin)),
                    )
                    .service(
                        web::scope("")
                            .wrap(Condition::new(token_required, from_fn(require_token)))
                            .service(jobs::insert_job)
                            .service(jobs::update_by_name)
                            .service(jobs::delete_by_name)
                            .service(jobs::update_career_job)
                            .service(jobs::delete_career_job)
                            .service(applications::list_applications)
                            .service(applications::applications_summary)
                            .service(applications::applications_by_title)
                            .service(applications::shortlist_candidate)
                            .service(applications::reject_application)
                            .service(shortlist::list_shortlist)
                            .service(shortlist::shortlist_summary)
                            .service(shortlist::shortlist_by_title)
                            .service(shortlist::delete_application),
                    ),
            )
            .default_service(web::to(misc::serve_static));
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let reply = Reply::text(Outcome::Invalid, &err.to_string());
        actix_error::InternalError::from_response(err, HttpResponse::BadRequest().json(reply)).into()
    })
}

fn cors(origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(60 * 60);
    match origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

pub async fn run(settings: Settings) -> io::Result<()> {
    info!("Initializing state...");
    let portal = Portal::from_settings(&settings)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let portal = web::Data::new(portal);

    let cors_origin = settings.cors_origin.clone();
    let address = settings.bind_address();
    info!("Binding to {address}");

    HttpServer::new(move || {
        App::new()
            .wrap(cors(cors_origin.as_deref()))
            .wrap(middleware::Logger::default())
            .configure(routes(portal.clone()))
    })
    .bind(&address)?
    .run()
    .await
}
