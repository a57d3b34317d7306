//! Dashboard configuration.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Dashboard server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: IpAddr,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Page size for `/api/weather/logs` when `limit` is missing or invalid.
    #[serde(default = "default_logs_limit")]
    pub default_logs_limit: usize,
    /// Number of most recent readings the analytics endpoint summarizes.
    #[serde(default = "default_analytics_window")]
    pub analytics_window: usize,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    5000
}

fn default_logs_limit() -> usize {
    50
}

fn default_analytics_window() -> usize {
    100
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_logs_limit: default_logs_limit(),
            analytics_window: default_analytics_window(),
        }
    }
}

impl DashboardConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
