use std::net::Ipv4Addr;

use thiserror::Error;

use crate::model::Subnet;

/// Errors raised while turning a subnet declaration into a scope range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid IPv4 address '{0}'")]
    InvalidAddress(String),
    #[error("netmask '{0}' is not a contiguous prefix mask")]
    InvalidNetmask(String),
    #[error("a /{cidr} subnet has no usable host addresses")]
    NoUsableAddresses { cidr: u8 },
    #[error("network {network}/{cidr} extends past 255.255.255.255")]
    RangeOverflow { network: Ipv4Addr, cidr: u8 },
}

/// Address range a scope is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeRange {
    pub start: Ipv4Addr,
    pub end: Ipv4Addr,
    /// Number of declared `range` statements folded into this one.
    pub merged: usize,
}

impl ScopeRange {
    /// True when more than one declared range was collapsed into a single
    /// span, which also covers any gaps between them.
    pub fn is_collapsed(&self) -> bool {
        self.merged > 1
    }
}

pub fn parse_ipv4(value: &str) -> Result<Ipv4Addr, AddressError> {
    value
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| AddressError::InvalidAddress(value.to_string()))
}

/// Prefix length of a dotted-quad netmask, or `None` if its one bits are not
/// contiguous from the top.
pub fn netmask_to_cidr(mask: Ipv4Addr) -> Option<u8> {
    let host_span = u64::from(!u32::from(mask)) + 1;
    if !host_span.is_power_of_two() {
        return None;
    }
    Some(32 - host_span.trailing_zeros() as u8)
}

/// Compute the scope range for a subnet.
///
/// With declared ranges the result spans the lowest start to the highest end,
/// whether or not the ranges are adjacent. Without ranges it spans the usable
/// hosts: network + 1 through network + size - 2. The netmask is validated in
/// both cases.
pub fn scope_range(subnet: &Subnet) -> Result<ScopeRange, AddressError> {
    let network = parse_ipv4(&subnet.address)?;
    let mask = parse_ipv4(&subnet.netmask)?;
    let cidr =
        netmask_to_cidr(mask).ok_or_else(|| AddressError::InvalidNetmask(subnet.netmask.clone()))?;

    if !subnet.ranges.is_empty() {
        let mut start = u32::MAX;
        let mut end = u32::MIN;
        for range in &subnet.ranges {
            start = start.min(u32::from(parse_ipv4(&range.start)?));
            end = end.max(u32::from(parse_ipv4(&range.end)?));
        }
        return Ok(ScopeRange {
            start: Ipv4Addr::from(start),
            end: Ipv4Addr::from(end),
            merged: subnet.ranges.len(),
        });
    }

    let size = 1u64 << (32 - u32::from(cidr));
    if size <= 2 {
        return Err(AddressError::NoUsableAddresses { cidr });
    }
    let base = u64::from(u32::from(network));
    let first = base + 1;
    let last = u32::try_from(base + size - 2)
        .map_err(|_| AddressError::RangeOverflow { network, cidr })?;

    Ok(ScopeRange {
        start: Ipv4Addr::from(first as u32),
        end: Ipv4Addr::from(last),
        merged: 0,
    })
}
