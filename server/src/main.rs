mod assets;
mod config;

use crate::assets::{Assets, ConsoleConfig, STATIC_DIR};
use crate::config::ServerConfig;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use std::thread;
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = ServerConfig::parse();
    let url = config.url();

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(err) = webbrowser::open(&url) {
                warn!("could not open a browser: {err}");
            }
        });
    }

    info!("Swiple console at {url}, API at {}", config.api_domain);

    let console = ConsoleConfig {
        api_domain: config.api_domain.clone(),
    };
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Assets(&STATIC_DIR)))
            .app_data(web::Data::new(console.clone()))
            .configure(assets::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
