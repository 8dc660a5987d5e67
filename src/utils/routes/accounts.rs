use actix_web::{post, web, HttpResponse};

use crate::data::admins::AdminAccount;
use crate::error::PortalError;
use crate::state::Portal;
use crate::utils::enums::Outcome;
use crate::utils::middleware::token::acting_admin;
use crate::utils::structures::{AuthRequest, Reply};
use crate::utils::token::Claims;

const USERNAME_TAKEN: &str = "UserName Existed";

/// Mounted as its own resource so the guard around it can let the very first
/// signup through.
pub async fn add_admin(
    portal: web::Data<Portal>,
    claims: Option<web::ReqData<Claims>>,
    req_body: web::Json<AuthRequest>,
) -> Result<HttpResponse, PortalError> {
    let AuthRequest { username, password } = req_body.into_inner();

    // Skip the hashing cost when the name is plainly taken; `dump` still
    // refuses a duplicate that slips in meanwhile.
    if AdminAccount::get_by_username(&portal.store, &username)?.is_some() {
        return Ok(HttpResponse::Ok().json(Reply::text(Outcome::Conflict, USERNAME_TAKEN)));
    }

    let account = AdminAccount::new(username, &password, &portal.hash_secret)?;
    if !account.dump(&portal.store)? {
        return Ok(HttpResponse::Ok().json(Reply::text(Outcome::Conflict, USERNAME_TAKEN)));
    }
    tracing::info!(
        username = %account.username,
        added_by = acting_admin(claims.as_deref()),
        "admin added"
    );
    Ok(HttpResponse::Ok().json(Reply::ok("New admin added succesfully")))
}

#[post("/loginAdmin")]
pub async fn login_admin(
    portal: web::Data<Portal>,
    req_body: web::Json<AuthRequest>,
) -> Result<HttpResponse, PortalError> {
    let AuthRequest { username, password } = req_body.into_inner();

    let Some(account) = AdminAccount::get_by_username(&portal.store, &username)? else {
        tracing::info!(%username, "login for unknown admin");
        return Ok(HttpResponse::Ok().json(Reply::text(Outcome::Unauthorized, "invalid username")));
    };

    if !account.verify(&password, &portal.hash_secret)? {
        tracing::info!(%username, "login with wrong password");
        return Ok(HttpResponse::Ok().json(Reply::text(Outcome::Unauthorized, "invalid password")));
    }

    let token = portal.tokens.issue(&account.username)?;
    tracing::info!(%username, "admin logged in");
    Ok(HttpResponse::Ok().json(Reply::session(token, account.username)))
}
