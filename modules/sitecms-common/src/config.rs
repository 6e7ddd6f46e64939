use std::env;

use tracing::info;

/// Application configuration loaded from environment variables.
/// Every value has a local-development default.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Document store the admin client talks to
    pub docstore_url: String,

    // Public site endpoint that receives revalidation signals
    pub revalidate_url: String,

    // Directory the API keeps documents in. Unset means in-memory only.
    pub data_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first.
    /// Panics with a clear message if `WEB_PORT` is not a number.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let web_port: u16 = env::var("WEB_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .expect("WEB_PORT must be a number");
        let docstore_url = env::var("DOCSTORE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{web_port}"));
        let revalidate_url = env::var("REVALIDATE_URL").unwrap_or_else(|_| docstore_url.clone());

        Self {
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port,
            docstore_url: trim_url(docstore_url),
            revalidate_url: trim_url(revalidate_url),
            data_dir: env::var("SITECMS_DATA_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    pub fn log_summary(&self) {
        info!(
            web_host = %self.web_host,
            web_port = self.web_port,
            docstore_url = %self.docstore_url,
            revalidate_url = %self.revalidate_url,
            data_dir = self.data_dir.as_deref().unwrap_or("(memory)"),
            "Configuration loaded"
        );
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
