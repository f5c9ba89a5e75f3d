use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            bind_addr: env::var("BIND_ADDR")
                .ok()
                .and_then(|a| a.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
