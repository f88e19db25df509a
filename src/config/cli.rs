//! Command-line and environment overrides.

use clap::Parser;
use std::path::PathBuf;

use crate::config::schema::ServiceConfig;

/// CLI argument structure.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "no-as-a-service")]
#[command(about = "Serves a random, politely negotiated \"no\"")]
pub struct Args {
    /// TOML configuration file. Defaults are used when absent.
    #[arg(short, long, env = "NOAAS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reasons file (JSON array of strings), overrides `reasons.path`.
    #[arg(short, long)]
    pub reasons: Option<String>,

    /// Full bind address, overrides `listener.bind_address`.
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Bind IP, combined with the configured port when `--bind` is absent.
    #[arg(long, env = "NOAAS_IP")]
    pub ip: Option<String>,

    /// Bind port, combined with the configured IP when `--bind` is absent.
    #[arg(long, env = "NOAAS_PORT")]
    pub port: Option<u16>,
}

impl Args {
    /// Apply CLI and environment overrides on top of a file/default config.
    pub fn apply(&self, config: &mut ServiceConfig) {
        if let Some(path) = &self.reasons {
            config.reasons.path = path.clone();
        }

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
            return;
        }

        if self.ip.is_none() && self.port.is_none() {
            return;
        }

        let (current_ip, current_port) = split_host_port(&config.listener.bind_address);
        let ip = self.ip.clone().unwrap_or(current_ip);
        let port = self
            .port
            .map(|p| p.to_string())
            .unwrap_or(current_port);

        config.listener.bind_address = if ip.contains(':') && !ip.starts_with('[') {
            format!("[{ip}]:{port}")
        } else {
            format!("{ip}:{port}")
        };
    }
}

fn split_host_port(address: &str) -> (String, String) {
    match address.rsplit_once(':') {
        Some((host, port)) => (host.to_string(), port.to_string()),
        None => (address.to_string(), "3000".to_string()),
    }
}
