use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use super::ExchangeError;

/// `count` nodes on one host, node `i` listening on `base_port + i`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RingTopology {
    index: usize,
    count: usize,
    host: IpAddr,
    base_port: u16,
}

impl RingTopology {
    pub const DEFAULT_BASE_PORT: u16 = 5000;

    pub fn new(index: usize, count: usize) -> Result<Self, ExchangeError> {
        Self::with_address(index, count, IpAddr::V4(Ipv4Addr::LOCALHOST), Self::DEFAULT_BASE_PORT)
    }

    pub fn with_address(index: usize, count: usize, host: IpAddr, base_port: u16) -> Result<Self, ExchangeError> {
        let fits = index < count && usize::from(base_port) + (count - 1) <= usize::from(u16::MAX);
        if !fits {
            return Err(ExchangeError::InvalidTopology {
                index,
                count,
                base_port,
            });
        }
        Ok(Self {
            index,
            count,
            host,
            base_port,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn upstream(&self) -> usize {
        (self.index + self.count - 1) % self.count
    }

    /// Every other node, nearest upstream first: `i-1, i-2, ...` modulo the
    /// ring size.
    pub fn peer_order(&self) -> Vec<usize> {
        (1..self.count)
            .map(|k| (self.index + self.count - k) % self.count)
            .collect()
    }

    /// Address of `node`, or `None` when it is not part of the ring.
    pub fn address_of(&self, node: usize) -> Option<SocketAddr> {
        if node >= self.count {
            return None;
        }
        let port = u16::try_from(node).ok()?.checked_add(self.base_port)?;
        Some(SocketAddr::new(self.host, port))
    }

    /// `node` must be below `count`; the constructor keeps every such port
    /// inside `u16`.
    fn port_of(&self, node: usize) -> SocketAddr {
        SocketAddr::new(self.host, self.base_port + node as u16)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.port_of(self.index)
    }

    pub fn peer_addrs(&self) -> Vec<SocketAddr> {
        self.peer_order().into_iter().map(|n| self.port_of(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_wraps_around() {
        assert_eq!(RingTopology::new(0, 4).unwrap().upstream(), 3);
        assert_eq!(RingTopology::new(2, 4).unwrap().upstream(), 1);
        assert_eq!(RingTopology::new(0, 1).unwrap().upstream(), 0);
    }

    #[test]
    fn peer_order_skips_self_and_never_repeats() {
        let ring = RingTopology::new(1, 4).unwrap();
        let order = ring.peer_order();
        assert_eq!(order, [0, 3, 2]);
        let cycle: Vec<usize> = order.iter().cycle().take(9).copied().collect();
        assert!(cycle.windows(2).all(|w| w[0] != w[1]));
        assert!(RingTopology::new(0, 1).unwrap().peer_order().is_empty());
    }

    #[test]
    fn ports_follow_the_index() {
        let ring = RingTopology::new(2, 3).unwrap();
        assert_eq!(ring.listen_addr().port(), 5002);
        let ports: Vec<u16> = ring.peer_addrs().iter().map(SocketAddr::port).collect();
        assert_eq!(ports, [5001, 5000]);
    }

    #[test]
    fn addresses_outside_the_ring_are_none() {
        let ring = RingTopology::with_address(0, 3, IpAddr::V4(Ipv4Addr::LOCALHOST), u16::MAX - 2).unwrap();
        assert_eq!(ring.address_of(2).map(|a| a.port()), Some(u16::MAX));
        assert_eq!(ring.address_of(3), None);
        assert_eq!(ring.address_of(usize::MAX), None);
    }

    #[test]
    fn invalid_rings_are_rejected() {
        assert!(RingTopology::new(3, 3).is_err());
        assert!(RingTopology::new(0, 0).is_err());
        assert!(RingTopology::with_address(0, 10, IpAddr::V4(Ipv4Addr::LOCALHOST), u16::MAX - 2).is_err());
    }
}
