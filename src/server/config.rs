use std::net::SocketAddr;
use std::path::PathBuf;

/// Address `minigit serve` binds when none is given
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Working directory of the served repository
    pub repository_path: PathBuf,
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr, repository_path: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr,
            repository_path: repository_path.into(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            repository_path: PathBuf::from("."),
        }
    }
}
