use crate::api::*;
use crate::Error;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use serde::Serialize;

fn reply<T: Serialize>(result: crate::Result<T>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => failure(e),
    }
}

fn failure(e: Error) -> HttpResponse {
    let body = ApiError::from(&e);
    match e {
        Error::NotFound(_) => HttpResponse::NotFound().json(body),
        Error::BadInput(_) => HttpResponse::BadRequest().json(body),
        Error::Unavailable(_) => HttpResponse::ServiceUnavailable().json(body),
        Error::Internal(ref detail) => {
            log::error!("internal error: {}", detail);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub async fn health(api: web::Data<API>) -> impl Responder {
    HttpResponse::Ok().body(format!("ok ({} records)", api.data().len()))
}
pub async fn species(api: web::Data<API>) -> impl Responder {
    HttpResponse::Ok().json(api.species())
}
pub async fn records(
    api: web::Data<API>,
    name: web::Path<String>,
    req: web::Query<SetRecords>,
) -> impl Responder {
    reply(api.records(&name, &req))
}
pub async fn environment(api: web::Data<API>, name: web::Path<String>) -> impl Responder {
    reply(api.environment(&name))
}
pub async fn nearest(api: web::Data<API>, req: web::Query<SetNearest>) -> impl Responder {
    reply(api.nearest(req.lat, req.lon))
}
pub async fn predict(api: web::Data<API>, req: web::Json<SetPredict>) -> impl Responder {
    reply(api.predict(&req).await)
}
