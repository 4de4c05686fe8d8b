//! Host settings, from the command line or the environment.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_DOMAIN: &str = "http://localhost:8000/api/v1";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "swiple-server", version, about = "Serves the Swiple console")]
pub struct ServerConfig {
    #[arg(long, env = "SWIPLE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "SWIPLE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Handed to the console through `/config.json`.
    #[arg(long, env = "API_DOMAIN", default_value = DEFAULT_API_DOMAIN)]
    pub api_domain: String,

    /// Open the console in the default browser once the server is up.
    #[arg(
        long,
        env = "SWIPLE_OPEN_BROWSER",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub open_browser: bool,
}

impl ServerConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
