use std::net::SocketAddr;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub api_key: Option<String>,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("CAMBIO_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid CAMBIO_LISTEN_ADDR");
        let db_path =
            std::env::var("CAMBIO_DB_PATH").unwrap_or_else(|_| "./db/cambio.db".into());
        let api_key = std::env::var("CAMBIO_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let static_dir = std::env::var("CAMBIO_STATIC_DIR").unwrap_or_else(|_| "dist".into());
        Self {
            listen_addr,
            db_path,
            api_key,
            static_dir,
        }
    }
}
