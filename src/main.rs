mod backend;
mod config;
mod controller;
mod error;
mod post;
mod presenter;
mod render;

use actix_web::{get, http::header, web, App, HttpResponse, HttpServer, Responder};
use backend::{HttpTweetSource, TweetSource};
use config::WidgetConfig;
use controller::SearchController;
use presenter::Messages;
use reqwest::Client;
use serde::Deserialize;

/// Shared between actix workers: one controller, one visible search.
struct WidgetState<S> {
    controller: SearchController<S>,
    messages: &'static Messages,
    title: String,
}

#[derive(Debug, Deserialize)]
struct WidgetQuery {
    handle: Option<String>,
}

/// Glance calls this endpoint and embeds the returned HTML.
/// `/?handle=alice` runs a search; `/` shows whatever is current.
async fn index<S: TweetSource + 'static>(
    data: web::Data<WidgetState<S>>,
    query: web::Query<WidgetQuery>,
) -> impl Responder {
    let handle = query.handle.as_deref();
    let result = match handle {
        Some(raw) => data.controller.submit(raw).await,
        None => data.controller.current(),
    };

    let body = render::render_widget(&result, handle, data.messages, chrono::Utc::now());

    HttpResponse::Ok()
        .insert_header(("Widget-Title", data.title.as_str()))
        .insert_header(("Widget-Content-Type", "html"))
        .insert_header(header::ContentType::html())
        .body(body)
}

#[get("/healthz")]
async fn healthz() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

fn configure<S: TweetSource + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(healthz)
        .route("/", web::get().to(index::<S>));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glance_widget_hateguard=info".into()),
        )
        .init();

    let config = WidgetConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let client = Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(std::io::Error::other)?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        backend = %config.api_base_url,
        locale = %config.locale,
        "hateguard widget listening"
    );

    let messages = Messages::for_locale(config.locale);
    let source = HttpTweetSource::new(client, config.api_base_url);

    let state = web::Data::new(WidgetState {
        controller: SearchController::new(source, messages.search_failed),
        messages,
        title: config.title,
    });

    let mut transitions = state.controller.subscribe();
    actix_web::rt::spawn(async move {
        while transitions.changed().await.is_ok() {
            let current = transitions.borrow_and_update().clone();
            tracing::debug!(
                loading = current.is_loading(),
                failed = current.error().is_some(),
                scanning = current.is_scanning(),
                posts = current.posts().len(),
                "search state changed"
            );
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure::<HttpTweetSource>)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
