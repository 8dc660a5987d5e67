use actix_web::{delete, get, web, HttpResponse};

use crate::data::applications;
use crate::error::PortalError;
use crate::state::Portal;
use crate::utils::board;
use crate::utils::enums::Outcome;
use crate::utils::routes::applications::APPLICATION_NOT_FOUND;
use crate::utils::structures::Reply;

#[get("/shortlist")]
pub async fn list_shortlist(portal: web::Data<Portal>) -> Result<HttpResponse, PortalError> {
    let shortlisted = applications::get_shortlisted(&portal.store)?;
    Ok(HttpResponse::Ok().json(Reply::documents(shortlisted)))
}

#[get("/shortlist/summary")]
pub async fn shortlist_summary(portal: web::Data<Portal>) -> Result<HttpResponse, PortalError> {
    let shortlisted = applications::get_shortlisted(&portal.store)?;
    Ok(HttpResponse::Ok().json(Reply::items(&board::summarize_by_title(&shortlisted))?))
}

#[get("/shortlist/byTitle/{label}")]
pub async fn shortlist_by_title(
    portal: web::Data<Portal>,
    label: web::Path<String>,
) -> Result<HttpResponse, PortalError> {
    let shortlisted = applications::get_shortlisted(&portal.store)?;
    let selected = board::select_by_title(&shortlisted, &label)
        .into_iter()
        .cloned()
        .collect();
    Ok(HttpResponse::Ok().json(Reply::documents(selected)))
}

#[delete("/deleteApplication/{email}")]
pub async fn delete_application(
    portal: web::Data<Portal>,
    email: web::Path<String>,
) -> Result<HttpResponse, PortalError> {
    if !applications::delete_shortlisted(&portal.store, &email)? {
        return Ok(HttpResponse::Ok().json(Reply::text(Outcome::NotFound, APPLICATION_NOT_FOUND)));
    }
    tracing::info!(email = %email.as_str(), "shortlist entry deleted");
    Ok(HttpResponse::Ok().json(Reply::ok("Application Deleted sucessfully")))
}
