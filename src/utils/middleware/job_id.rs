use actix_web::dev::Payload;
use actix_web::{error, web, Error, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde_json::Value;

use crate::data::database::Document;
use crate::data::postings;
use crate::state::Portal;

/// A posted job body that has been given the next `jobId` from the
/// persisted sequence. Any `jobId` sent by the client is replaced.
pub struct StampedJob(pub Document);

impl FromRequest for StampedJob {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let portal = req.app_data::<web::Data<Portal>>().cloned();
        let body = web::Json::<Document>::from_request(req, payload);

        Box::pin(async move {
            let web::Json(mut job) = body.await?;
            let portal =
                portal.ok_or_else(|| error::ErrorInternalServerError("portal state missing"))?;

            let job_id = postings::next_job_id(&portal.store)?;
            tracing::debug!(%job_id, "stamped job id");
            job.insert("jobId".to_string(), Value::String(job_id));

            Ok(StampedJob(job))
        })
    }
}
