//! Command-line and environment configuration

use std::net::SocketAddr;

use clap::Parser;

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;
use crate::http::ServerConfig;
use crate::media::{CloudinaryConfig, DEFAULT_FOLDER};

/// Arguments for the devevent server
#[derive(Parser, Debug, Clone)]
#[command(name = "devevent-server", version, about = "Developer event listings and bookings")]
pub struct ServerArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "DEVEVENT_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, env = "DEVEVENT_CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// Database URL; requests that touch the store fail until it is set
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    #[arg(long, env = "CLOUDINARY_CLOUD_NAME")]
    pub cloudinary_cloud_name: Option<String>,

    #[arg(long, env = "CLOUDINARY_API_KEY")]
    pub cloudinary_api_key: Option<String>,

    #[arg(long, env = "CLOUDINARY_API_SECRET", hide_env_values = true)]
    pub cloudinary_api_secret: Option<String>,

    /// Folder uploaded images are stored under
    #[arg(long, env = "CLOUDINARY_FOLDER", default_value = DEFAULT_FOLDER)]
    pub cloudinary_folder: String,
}

impl ServerArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
        }
    }

    /// Cloudinary settings, present only when all three credentials are set.
    pub fn media_config(&self) -> Option<CloudinaryConfig> {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned);

        Some(CloudinaryConfig {
            cloud_name: present(&self.cloudinary_cloud_name)?,
            api_key: present(&self.cloudinary_api_key)?,
            api_secret: present(&self.cloudinary_api_secret)?,
            folder: self.cloudinary_folder.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Explicit flags so ambient environment variables cannot leak in.
    fn parse(extra: &[&str]) -> ServerArgs {
        let mut argv = vec![
            "devevent-server",
            "--cloudinary-folder",
            "DevEvent",
            "--max-connections",
            "5",
        ];
        argv.extend_from_slice(extra);
        ServerArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn server_config_from_args() {
        let args = parse(&["--bind", "0.0.0.0:8080", "--cors-permissive"]);
        let config = args.server_config();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.cors_permissive);
    }

    #[test]
    fn media_config_requires_all_credentials() {
        let args = parse(&[
            "--cloudinary-cloud-name",
            "demo",
            "--cloudinary-api-key",
            "key",
            "--cloudinary-api-secret",
            "secret",
        ]);
        let media = args.media_config().unwrap();
        assert_eq!(media.cloud_name, "demo");
        assert_eq!(media.folder, "DevEvent");
    }

    #[test]
    fn media_config_rejects_blank_secret() {
        let args = parse(&[
            "--cloudinary-cloud-name",
            "demo",
            "--cloudinary-api-key",
            "key",
            "--cloudinary-api-secret",
            "  ",
        ]);
        assert!(args.media_config().is_none());
    }

    #[test]
    fn bad_bind_address_rejected() {
        assert!(ServerArgs::try_parse_from(["devevent-server", "--bind", "nowhere"]).is_err());
    }
}
