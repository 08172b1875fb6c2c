use std::{env, net::SocketAddr, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub contacts_file: PathBuf,
    pub bind_addr: String,
    pub bind_port: u16,
    pub directory_port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CONTACTS_FILE is required and must not be empty")]
    MissingContactsFile,
    #[error("BIND_PORT must be a valid u16")]
    InvalidBindPort,
    #[error("DIRECTORY_PORT must be a valid u16")]
    InvalidDirectoryPort,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let contacts_file = env::var("CONTACTS_FILE")
            .ok()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingContactsFile)?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let bind_port = env::var("BIND_PORT")
            .ok()
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidBindPort)
            })
            .transpose()?
            .unwrap_or(5006);

        // The port advertised in self-referential URLs. The Cisco 7940 reports
        // the inbound connection port unreliably, so the phones are pointed at
        // this value rather than at whatever port the request arrived on.
        let directory_port = env::var("DIRECTORY_PORT")
            .ok()
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidDirectoryPort)
            })
            .transpose()?
            .unwrap_or(bind_port);

        let config = Self {
            contacts_file,
            bind_addr,
            bind_port,
            directory_port,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}
