use super::config::Config;
use super::handlers;
use crate::api::API;
use crate::api::ApiError;
use crate::occurrence::Loader;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::error::InternalError;
use actix_web::middleware::Logger;
use actix_web::web;
use anyhow::Context;

pub struct Server;

impl Server {
    pub async fn run(config: Config) -> anyhow::Result<()> {
        let loader = Loader::new(&config.data);
        let api = API::open(&loader, &config.models)
            .with_context(|| format!("load occurrences from {}", config.data.display()))?;
        let api = web::Data::new(api);
        log::info!("starting HTTP server on {}", config.bind);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .configure(routes(api.clone()))
        })
        .workers(config.workers)
        .bind(&config.bind)
        .with_context(|| format!("bind {}", config.bind))?
        .run()
        .await
        .context("run HTTP server")
    }
}

/// Route table, shared by the server and the integration tests.
#[rustfmt::skip]
pub fn routes(api: web::Data<API>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(api)
            .app_data(web::QueryConfig::default().error_handler(|e, _| rejected(e.to_string())))
            .app_data(web::PathConfig::default().error_handler(|e, _| rejected(e.to_string())))
            .app_data(web::JsonConfig::default().error_handler(|e, _| rejected(e.to_string())))
            .route("/health",                      web::get().to(handlers::health))
            .route("/species",                     web::get().to(handlers::species))
            .route("/species/{name}",              web::get().to(handlers::records))
            .route("/species/{name}/environment",  web::get().to(handlers::environment))
            .route("/nearest_occurrence",          web::get().to(handlers::nearest))
            .route("/predict",                     web::post().to(handlers::predict));
    }
}

/// Malformed query strings and bodies get the same structured body as
/// every other caller error.
fn rejected(detail: String) -> actix_web::Error {
    let body = ApiError::from(&crate::Error::BadInput(detail.clone()));
    InternalError::from_response(detail, HttpResponse::BadRequest().json(body)).into()
}
