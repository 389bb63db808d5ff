use actix_web::{
    delete, dev::Payload, http::header, post, web, FromRequest, HttpRequest, HttpResponse,
};
use actix_web_validator::Json;
use futures_util::future::{ready, Ready};

use crate::api::job::dto::LoginResponse;
use crate::api::job::models::LoginRequest;
use crate::api::job::service::ServiceError;
use crate::auth::{AdminSessions, AdminToken};

/// Extractor for handlers that need an admin session
///
/// Reads `Authorization: Bearer <token>` and checks it against the live
/// sessions; anything else is rejected with 401.
pub struct AdminSession(pub AdminToken);

impl FromRequest for AdminSession {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AdminSession, ServiceError> {
    let sessions = req
        .app_data::<web::Data<AdminSessions>>()
        .ok_or(ServiceError::Unauthorized)?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(ServiceError::Unauthorized)?;

    sessions
        .verify(token)
        .map(AdminSession)
        .ok_or(ServiceError::Unauthorized)
}

#[post("")]
async fn login(
    sessions: web::Data<AdminSessions>,
    body: Json<LoginRequest>,
) -> Result<HttpResponse, ServiceError> {
    let token = sessions
        .login(&body.password)
        .ok_or(ServiceError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token: token.as_str().to_string(),
    }))
}

#[delete("")]
async fn logout(sessions: web::Data<AdminSessions>, session: AdminSession) -> HttpResponse {
    sessions.logout(&session.0);
    HttpResponse::NoContent().finish()
}

pub fn session_config(config: &mut web::ServiceConfig) {
    config.service(web::scope("session").service(login).service(logout));
}
