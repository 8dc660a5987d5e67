use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, Header};
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpMessage, HttpResponse};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};

use crate::data::admins::AdminAccount;
use crate::state::Portal;
use crate::utils::enums::Outcome;
use crate::utils::structures::Reply;
use crate::utils::token::{Claims, TokenCheck};

pub const LOGIN_REQUIRED: &str = "please login to continue";
pub const SESSION_EXPIRED: &str = "session expired please login to continue";

/// Lets a request through only with a valid `Bearer` token. Refusals are
/// ordinary 200 replies carrying a login message, which is what the portal
/// front end looks for.
pub async fn require_token<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    if !req.headers().contains_key(header::AUTHORIZATION) {
        tracing::warn!(path = %req.path(), "token missing, request refused");
        return Ok(req
            .into_response(HttpResponse::Ok().json(Reply::text(Outcome::Unauthorized, LOGIN_REQUIRED)))
            .map_into_right_body());
    }

    let check = match (
        Authorization::<Bearer>::parse(&req),
        req.app_data::<web::Data<Portal>>(),
    ) {
        (Ok(auth), Some(portal)) => portal.tokens.check(auth.as_ref().token()),
        _ => TokenCheck::Invalid,
    };

    match check {
        TokenCheck::Valid(claims) => {
            tracing::debug!(username = %claims.username, "token accepted");
            req.extensions_mut().insert(claims);
            Ok(next.call(req).await?.map_into_left_body())
        }
        TokenCheck::Expired | TokenCheck::Invalid => {
            tracing::warn!(path = %req.path(), "token rejected");
            Ok(req
                .into_response(HttpResponse::Ok().json(Reply::text(Outcome::Unauthorized, SESSION_EXPIRED)))
                .map_into_right_body())
        }
    }
}

/// `require_token`, except that requests pass while no admin account exists,
/// so the first admin can sign up on a fresh store.
pub async fn require_token_after_first_admin<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let first_admin = match req.app_data::<web::Data<Portal>>() {
        Some(portal) => !AdminAccount::any(&portal.store)?,
        None => false,
    };
    if first_admin {
        tracing::warn!(path = %req.path(), "no admin account yet, letting request through");
        return Ok(next.call(req).await?.map_into_left_body());
    }
    require_token(req, next).await
}

/// Username the guard stored for this request, for logging.
pub fn acting_admin(claims: Option<&Claims>) -> &str {
    claims.map_or("anonymous", |claims| claims.username.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acting_admin_falls_back_when_unguarded() {
        let claims = Claims {
            username: "root".to_string(),
            iat: 0,
            exp: 60,
            jti: "x".to_string(),
        };
        assert_eq!(acting_admin(Some(&claims)), "root");
        assert_eq!(acting_admin(None), "anonymous");
    }
}
