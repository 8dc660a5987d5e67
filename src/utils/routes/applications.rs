use actix_web::{get, post, web, HttpResponse};
use chrono::Local;
use serde_json::Value;

use crate::data::applications;
use crate::data::database::{Document, Move};
use crate::error::PortalError;
use crate::state::Portal;
use crate::utils::board;
use crate::utils::enums::Outcome;
use crate::utils::mailer::Notification;
use crate::utils::middleware::token::acting_admin;
use crate::utils::structures::Reply;
use crate::utils::token::Claims;

pub const APPLICATION_NOT_FOUND: &str = "Application not Existed";

#[post("/saveApplication")]
pub async fn save_application(
    portal: web::Data<Portal>,
    application: web::Json<Document>,
) -> Result<HttpResponse, PortalError> {
    applications::save(&portal.store, &application)?;
    tracing::info!(email = ?application.get("email"), "application received");
    Ok(HttpResponse::Ok().json(Reply::ok("Submitted successfully")))
}

#[get("/applications")]
pub async fn list_applications(portal: web::Data<Portal>) -> Result<HttpResponse, PortalError> {
    let applications = applications::get_all(&portal.store)?;
    Ok(HttpResponse::Ok().json(Reply::documents(applications)))
}

#[get("/applications/summary")]
pub async fn applications_summary(
    portal: web::Data<Portal>,
) -> Result<HttpResponse, PortalError> {
    let applications = applications::get_all(&portal.store)?;
    let summary = board::summarize_by_title(&applications);
    Ok(HttpResponse::Ok().json(Reply::items(&summary)?))
}

#[get("/applications/byTitle/{label}")]
pub async fn applications_by_title(
    portal: web::Data<Portal>,
    label: web::Path<String>,
) -> Result<HttpResponse, PortalError> {
    let applications = applications::get_all(&portal.store)?;
    let selected = board::select_by_title(&applications, &label)
        .into_iter()
        .cloned()
        .collect();
    Ok(HttpResponse::Ok().json(Reply::documents(selected)))
}

#[post("/SendMail/{mail}")]
pub async fn shortlist_candidate(
    portal: web::Data<Portal>,
    claims: Option<web::ReqData<Claims>>,
    mail: web::Path<String>,
) -> Result<HttpResponse, PortalError> {
    let email = mail.into_inner();

    match applications::shortlist(&portal.store, &email)? {
        Move::Missing => {
            tracing::info!(%email, "shortlist requested for unknown application");
            Ok(HttpResponse::Ok().json(Reply::text(Outcome::NotFound, APPLICATION_NOT_FOUND)))
        }
        Move::AlreadyPresent => {
            Ok(HttpResponse::Ok().json(Reply::text(Outcome::Conflict, "Already shortlisted")))
        }
        Move::Moved(application) => {
            tracing::info!(%email, by = acting_admin(claims.as_deref()), "candidate shortlisted");
            let job_title = application
                .get("jobTitle")
                .and_then(Value::as_str)
                .unwrap_or("");
            portal
                .mailer
                .send(Notification::shortlisted(&email, job_title, Local::now()));
            Ok(HttpResponse::Ok().json(Reply::ok("Candidate was Shortlisted")))
        }
    }
}

#[post("/rejectmail/{mail}")]
pub async fn reject_application(
    portal: web::Data<Portal>,
    claims: Option<web::ReqData<Claims>>,
    mail: web::Path<String>,
) -> Result<HttpResponse, PortalError> {
    let email = mail.into_inner();

    if applications::reject(&portal.store, &email)?.is_none() {
        return Ok(HttpResponse::Ok().json(Reply::text(Outcome::NotFound, APPLICATION_NOT_FOUND)));
    }
    tracing::info!(%email, by = acting_admin(claims.as_deref()), "application rejected");
    portal.mailer.send(Notification::rejected(&email));
    Ok(HttpResponse::Ok().json(Reply::ok("Application was Rejected")))
}
