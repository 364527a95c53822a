use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_ORS_BASE_URL: &str = "https://api.openrouteservice.org";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// JSON array of logged vehicle positions.
    pub positions_path: PathBuf,
    /// Route definitions; the bundled set is used when unset.
    pub definitions_path: Option<PathBuf>,
    /// Web bundle and marker images, served under `/`.
    pub static_root: PathBuf,
    pub ors_api_key: Option<String>,
    pub ors_base_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        let addr = env::var("ROUTES_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("invalid ROUTES_ADDR {addr:?}: {e}"))?;

        Ok(Self {
            addr,
            positions_path: env::var("POSITIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/positions.json")),
            definitions_path: env::var("ROUTE_DEFINITIONS_PATH").ok().map(PathBuf::from),
            static_root: env::var("STATIC_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            ors_api_key: env_var_non_empty("ORS_API_KEY"),
            ors_base_url: env::var("ORS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ORS_BASE_URL.to_string()),
        })
    }
}

fn env_var_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
