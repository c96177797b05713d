use actix_web::{web, App, HttpServer};
use log::{error, info, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use manhwa_scraper_api::app_state::AppState;
use manhwa_scraper_api::config::Config;
use manhwa_scraper_api::routes;
use std::path::Path;

/// Use `log4rs.yml` when present; otherwise log to stdout at info level
fn init_logging() {
    if Path::new("log4rs.yml").exists() {
        match log4rs::init_file("log4rs.yml", Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Failed to load log4rs.yml, using console logging: {}", e),
        }
    }

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {t} - {m}{n}")))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info));

    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Failed to initialise logging: {}", e);
            }
        }
        Err(e) => eprintln!("Invalid logging configuration: {}", e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = Config::load();
    let port = config.listen_port();

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };
    info!("Serving sources: {}", state.sites.names().join(", "));
    let data = web::Data::new(state);

    // Try the configured port first, then the next few
    let mut last_err: Option<std::io::Error> = None;
    for port in port..=port.saturating_add(10) {
        let data_clone = data.clone();
        let addr = format!("0.0.0.0:{}", port);
        match HttpServer::new(move || {
            App::new()
                .app_data(data_clone.clone())
                .wrap(routes::cors_headers())
                .configure(routes::configure)
        })
        .bind(&addr)
        {
            Ok(server) => {
                info!("Listening on {}", addr);
                return server.run().await;
            }
            Err(e) => {
                error!("Could not bind {}: {}", addr, e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::AddrInUse, "No available port")
    }))
}
