use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

use super::codec::EndpointRecord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),
    #[error("Port out of range: {0}")]
    PortOutOfRange(u32),
}

/// A reachable server: IP address plus port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    address: IpAddr,
    port: u16,
}

impl Endpoint {
    pub fn new(address: IpAddr, port: u16) -> Self {
        Self { address, port }
    }

    /// Parses a textual IPv4 or IPv6 address
    pub fn parse(address: &str, port: u16) -> Result<Self, EndpointError> {
        let address = address
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| EndpointError::InvalidAddress(address.to_owned()))?;
        Ok(Self::new(address, port))
    }

    // Getters
    pub fn address(&self) -> IpAddr { self.address }
    pub fn port(&self) -> u16 { self.port }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip(), addr.port())
    }
}

impl From<Endpoint> for SocketAddr {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.socket_addr()
    }
}

impl From<&Endpoint> for EndpointRecord {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            address: endpoint.address.to_string(),
            port: u32::from(endpoint.port),
        }
    }
}

impl TryFrom<EndpointRecord> for Endpoint {
    type Error = EndpointError;

    fn try_from(record: EndpointRecord) -> Result<Self, Self::Error> {
        let port = u16::try_from(record.port)
            .map_err(|_| EndpointError::PortOutOfRange(record.port))?;
        Self::parse(&record.address, port)
    }
}

/// Formats as `ip:port`, with IPv6 addresses in brackets
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<SocketAddr>()
            .map(Endpoint::from)
            .map_err(|_| EndpointError::InvalidAddress(s.to_owned()))
    }
}
