use std::env;

use anyhow::Context as _;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 9998;

const HOST_VAR: &str = "MONITOR_RPC_HOST";
const PORT_VAR: &str = "MONITOR_RPC_PORT";

pub fn host() -> String {
    env::var(HOST_VAR).unwrap_or_else(|_| DEFAULT_HOST.to_owned())
}

pub fn port() -> anyhow::Result<u16> {
    match env::var(PORT_VAR) {
        Ok(v) => v
            .parse()
            .with_context(|| format!("invalid {}: {:?}", PORT_VAR, v)),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

/// Plaintext endpoint URI for the monitor service.
pub fn endpoint(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("http://[{}]:{}", host, port)
    } else {
        format!("http://{}:{}", host, port)
    }
}

pub fn address() -> anyhow::Result<String> {
    Ok(endpoint(&host(), port()?))
}
