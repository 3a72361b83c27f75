use anyhow::{bail, Result};
use indexmap::IndexMap;
use md5::{Digest, Md5};

/// One service's assignment: the offset base port and the env var name
/// (`UPPERCASE(service)_PORT`) it is written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortResult {
    pub service: String,
    pub port: u32,
    pub env_var: String,
}

/// Hash a seed string into an offset in `[0, range)`.
///
/// The offset is the first 32 bits of the MD5 digest of the seed (the
/// leading 8 hex characters, big-endian) reduced modulo `range`. Pure and
/// platform-independent: the same seed and range always yield the same
/// offset, which is the whole point. Changing the digest or the prefix
/// width would reshuffle every previously assigned port, so both are fixed.
///
/// A zero range is a configuration defect and is reported as an error
/// rather than patched over.
pub fn calculate_offset(seed: &str, range: u32) -> Result<u32> {
    if range == 0 {
        bail!("Offset range must be a positive integer, got 0");
    }

    let digest = Md5::digest(seed.as_bytes());
    let prefix = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    Ok(prefix % range)
}

/// Apply one offset uniformly to every base port, in the map's iteration
/// order. Relative spacing between services is preserved across checkouts
/// because every entry gets the same offset.
///
/// Final ports are not capped: a large base plus a large range can exceed
/// 65535, and whether that is acceptable is the operator's call.
pub fn apply_offset(base_ports: &IndexMap<String, u32>, offset: u32) -> Vec<PortResult> {
    base_ports
        .iter()
        .map(|(service, base)| PortResult {
            service: service.clone(),
            port: base + offset,
            env_var: format!("{}_PORT", service.to_uppercase()),
        })
        .collect()
}
