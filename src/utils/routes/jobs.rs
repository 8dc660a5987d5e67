use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::Value;

use crate::data::database::Document;
use crate::data::postings;
use crate::error::PortalError;
use crate::state::Portal;
use crate::utils::board;
use crate::utils::enums::Outcome;
use crate::utils::middleware::job_id::StampedJob;
use crate::utils::middleware::token::acting_admin;
use crate::utils::structures::{Reply, UpdateByName};
use crate::utils::token::Claims;

const JOB_NOT_FOUND: &str = "job not Existed";

#[post("/insert")]
pub async fn insert_job(
    portal: web::Data<Portal>,
    claims: Option<web::ReqData<Claims>>,
    job: StampedJob,
) -> Result<HttpResponse, PortalError> {
    let StampedJob(job) = job;
    postings::create(&portal.store, &job)?;
    tracing::info!(
        job_id = ?job.get("jobId"),
        by = acting_admin(claims.as_deref()),
        "job posted"
    );
    Ok(HttpResponse::Ok().json(Reply::ok("posted sucessfully")))
}

#[get("/jobs")]
pub async fn list_jobs(portal: web::Data<Portal>) -> Result<HttpResponse, PortalError> {
    let jobs = postings::get_all(&portal.store)?;
    Ok(HttpResponse::Ok().json(Reply::documents(jobs)))
}

#[get("/jobs/search/{term}")]
pub async fn search_jobs(
    portal: web::Data<Portal>,
    term: web::Path<String>,
) -> Result<HttpResponse, PortalError> {
    let jobs = postings::get_all(&portal.store)?;
    let matches = board::search_jobs(&jobs, Some(term.as_str()))
        .into_iter()
        .cloned()
        .collect();
    Ok(HttpResponse::Ok().json(Reply::documents(matches)))
}

#[put("/update")]
pub async fn update_by_name(
    portal: web::Data<Portal>,
    body: web::Json<UpdateByName>,
) -> Result<HttpResponse, PortalError> {
    let UpdateByName { name, job } = body.into_inner();
    let status = if postings::update_by_name(&portal.store, &name, job)? {
        Outcome::Ok
    } else {
        Outcome::NotFound
    };
    Ok(HttpResponse::Ok().json(Reply::text(status, "updated sucessfully")))
}

#[delete("/deleteOne/{name}")]
pub async fn delete_by_name(
    portal: web::Data<Portal>,
    name: web::Path<String>,
) -> Result<HttpResponse, PortalError> {
    let status = if postings::delete_by_name(&portal.store, &name)? {
        Outcome::Ok
    } else {
        Outcome::NotFound
    };
    Ok(HttpResponse::Ok().json(Reply::text(status, "deleted sucessfully")))
}

#[put("/updateCareerJob")]
pub async fn update_career_job(
    portal: web::Data<Portal>,
    body: web::Json<Document>,
) -> Result<HttpResponse, PortalError> {
    let body = body.into_inner();
    let Some(job_id) = body.get("jobId").and_then(Value::as_str) else {
        return Ok(HttpResponse::Ok().json(Reply::text(Outcome::NotFound, JOB_NOT_FOUND)));
    };

    if !postings::update(&portal.store, job_id, &body)? {
        tracing::info!(%job_id, "update for unknown job");
        return Ok(HttpResponse::Ok().json(Reply::text(Outcome::NotFound, JOB_NOT_FOUND)));
    }
    tracing::info!(%job_id, "job updated");
    Ok(HttpResponse::Ok().json(Reply::ok("Updated Sucessfully")))
}

#[delete("/deleteCareerJob/{job_id}")]
pub async fn delete_career_job(
    portal: web::Data<Portal>,
    claims: Option<web::ReqData<Claims>>,
    job_id: web::Path<String>,
) -> Result<HttpResponse, PortalError> {
    if !postings::delete(&portal.store, &job_id)? {
        return Ok(HttpResponse::Ok().json(Reply::text(Outcome::NotFound, JOB_NOT_FOUND)));
    }
    tracing::info!(
        job_id = %job_id.as_str(),
        by = acting_admin(claims.as_deref()),
        "job deleted"
    );
    Ok(HttpResponse::Ok().json(Reply::ok("job Deleted sucessfully")))
}
