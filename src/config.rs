use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::llm;

/// Process-level configuration, resolved once at startup.
///
/// The LLM API key is intentionally absent: it arrives with each request
/// and is discarded with it.
#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub llm_api_base: String,
    pub llm_model: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let llm_api_base =
            env::var("GROQ_API_BASE").unwrap_or_else(|_| llm::DEFAULT_API_BASE.to_string());
        let llm_model = env::var("GROQ_MODEL").unwrap_or_else(|_| llm::DEFAULT_MODEL.to_string());

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            llm_api_base,
            llm_model,
        })
    }
}
