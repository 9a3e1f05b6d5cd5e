use std::path::PathBuf;
use std::time::Duration;

// ==== knobs ====
const HOST: &str = "127.0.0.1";
const PORT: u16 = 3000;
const STATIC_DIR: &str = "./static";
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
const FINISHED_GAME_TTL: Duration = Duration::from_secs(10 * 60);

/// Server settings. All values are compiled in.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    /// How often each connection is pinged.
    pub heartbeat_interval: Duration,
    /// A connection silent for this long is closed.
    pub client_timeout: Duration,
    /// How long a finished game stays in the store.
    pub finished_game_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            static_dir: PathBuf::from(STATIC_DIR),
            heartbeat_interval: HEARTBEAT_INTERVAL,
            client_timeout: CLIENT_TIMEOUT,
            finished_game_ttl: FINISHED_GAME_TTL,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}
