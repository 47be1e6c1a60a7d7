use std::path::PathBuf;

use crate::error::Result;
pub use clap::Parser;
use url::Url;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Personal movie collection server")]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "CINELOG_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "CINELOG_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "CINELOG_BASE_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of server, as visible to users"
    )]
    pub base_url: Url,

    #[arg(
        long,
        env = "CINELOG_DATA_DIR",
        help = "Data directory, default is system default like ~/.local/share/cinelog",
        default_value_t = default_data_dir()
    )]
    data_dir: String,

    #[arg(
        long,
        env = "CINELOG_DATA_FILE",
        help = "Collection file, default is [data-dir]/movies.json, where data-dir is set by --data-dir"
    )]
    data_file: Option<PathBuf>,

    #[arg(
        long,
        env = "CINELOG_DEFAULT_PAGE_SIZE",
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(1..=1000),
        help = "Number of movies on one page of listing"
    )]
    pub default_page_size: u32,

    #[arg(long, env = "CINELOG_NO_CORS", help = "Disable CORS")]
    pub no_cors: bool,
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("cinelog"))
        .unwrap_or_else(|| PathBuf::from("cinelog"))
        .to_string_lossy()
        .to_string()
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| self.data_dir().join("movies.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["cinelog-server", "--data-dir", "/tmp/cl"])
            .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.listen_address, "127.0.0.1");
        assert_eq!(config.default_page_size, 10);
        assert!(!config.no_cors);
        assert_eq!(config.data_file(), PathBuf::from("/tmp/cl/movies.json"));
    }

    #[test]
    fn test_data_file_override() {
        let config = ServerConfig::try_parse_from([
            "cinelog-server",
            "--data-file",
            "/srv/films.json",
            "--default-page-size",
            "25",
            "--no-cors",
        ])
        .unwrap();
        assert_eq!(config.data_file(), PathBuf::from("/srv/films.json"));
        assert_eq!(config.default_page_size, 25);
        assert!(config.no_cors);
    }

    #[test]
    fn test_invalid_page_size() {
        let res = ServerConfig::try_parse_from(["cinelog-server", "--default-page-size", "0"]);
        assert!(res.is_err());
    }
}
