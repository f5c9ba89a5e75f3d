use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::IpAddr;

pub const GET_LOCAL_IP_COMMAND: &str = "get_local_ip";

/// Local network information reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub interface_name: String,
    pub ip_address: String,
    /// First three octets, e.g. "192.168.1"
    pub network_base: String,
}

impl NetworkInfo {
    pub fn from_ip(ip: IpAddr) -> Result<Self, String> {
        match ip {
            IpAddr::V4(ipv4) => {
                let [a, b, c, _] = ipv4.octets();
                Ok(Self {
                    interface_name: "primary".to_string(),
                    ip_address: ipv4.to_string(),
                    network_base: format!("{a}.{b}.{c}"),
                })
            }
            IpAddr::V6(_) => Err("IPv6 not supported".to_string()),
        }
    }
}

/// Host command handler for `get_local_ip`.
pub async fn get_local_ip(_args: Value) -> Result<Value, Value> {
    let ip = local_ip_address::local_ip()
        .map_err(|e| Value::String(format!("Failed to get local IP: {e}")))?;

    let info = NetworkInfo::from_ip(ip).map_err(Value::String)?;
    tracing::debug!(ip = %info.ip_address, "Resolved local IP");

    serde_json::to_value(info).map_err(|e| Value::String(e.to_string()))
}
