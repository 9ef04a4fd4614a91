use std::fmt::Formatter;
use std::str::FromStr;

pub const BD_ADDR_LENGTH: usize = 6;

/// A Bluetooth device address, held in the order it's displayed (most significant octet first).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BdAddr(pub [u8; BD_ADDR_LENGTH]);

impl BdAddr {
    pub fn octets(&self) -> [u8; BD_ADDR_LENGTH] {
        self.0
    }

    /// Builds an address from exactly six bytes, anything else is rejected.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let octets: [u8; BD_ADDR_LENGTH] = bytes.try_into().ok()?;
        Some(Self(octets))
    }
}

impl std::fmt::Display for BdAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("expected 6 hex groups separated by ':', found {0}")]
    WrongGroupCount(usize),

    #[error("'{0}' is not a hex value between 00 and ff")]
    InvalidOctet(String),
}

impl FromStr for BdAddr {
    type Err = AddressParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let groups: Vec<&str> = value.trim().split([':', '-']).collect();
        if groups.len() != BD_ADDR_LENGTH {
            return Err(AddressParseError::WrongGroupCount(groups.len()));
        }

        let mut octets = [0; BD_ADDR_LENGTH];
        for (octet, group) in octets.iter_mut().zip(groups) {
            // from_str_radix would happily take a leading '+', so check the digits ourselves.
            if group.is_empty() || group.len() > 2 || !group.chars().all(|c| c.is_ascii_hexdigit())
            {
                return Err(AddressParseError::InvalidOctet(group.to_string()));
            }
            *octet = u8::from_str_radix(group, 16)
                .map_err(|_| AddressParseError::InvalidOctet(group.to_string()))?;
        }

        Ok(Self(octets))
    }
}
