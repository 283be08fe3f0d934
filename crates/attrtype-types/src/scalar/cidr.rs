use super::{DomainError, Scalar, ScalarDomain};
use std::fmt;
use std::net::IpAddr;

/// IPv4 or IPv6 address range in `addr/prefix` notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrBlock;

/// Tri-state address range
pub type CidrBlockValue = Scalar<CidrBlock>;

/// A parsed address range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpNetwork {
    pub addr: IpAddr,
    pub prefix: u8,
}

impl IpNetwork {
    /// Check if `addr` lies within this range
    pub fn contains(&self, addr: IpAddr) -> bool {
        match (self.addr, addr) {
            (IpAddr::V4(net), IpAddr::V4(ip)) => {
                mask(u32::from(ip).into(), self.prefix, 32) == u128::from(u32::from(net))
            }
            (IpAddr::V6(net), IpAddr::V6(ip)) => mask(u128::from(ip), self.prefix, 128) == u128::from(net),
            _ => false,
        }
    }
}

impl Default for IpNetwork {
    fn default() -> Self {
        Self {
            addr: IpAddr::from([0, 0, 0, 0]),
            prefix: 0,
        }
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

fn mask(bits: u128, prefix: u8, width: u8) -> u128 {
    let host = u32::from(width - prefix);
    if host >= 128 { 0 } else { (bits >> host) << host }
}

impl ScalarDomain for CidrBlock {
    const NAME: &'static str = "CIDRBlock";

    type Parsed = IpNetwork;
    type Error = DomainError;

    fn parse(raw: &str) -> Result<IpNetwork, DomainError> {
        let (addr, prefix) = raw
            .split_once('/')
            .ok_or_else(|| DomainError::new(format!("invalid CIDR address: {}", raw)))?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| DomainError::new(format!("invalid CIDR address: {}", raw)))?;
        let prefix: u8 = prefix
            .parse()
            .map_err(|_| DomainError::new(format!("invalid CIDR address: {}", raw)))?;

        let (bits, width) = match addr {
            IpAddr::V4(ip) => (u128::from(u32::from(ip)), 32),
            IpAddr::V6(ip) => (u128::from(ip), 128),
        };
        if prefix > width {
            return Err(DomainError::new(format!("invalid CIDR address: {}", raw)));
        }
        if mask(bits, prefix, width) != bits {
            return Err(DomainError::new(format!(
                "{} is not a network address, host bits are set",
                raw
            )));
        }
        Ok(IpNetwork { addr, prefix })
    }
}
