//! Static-asset fingerprinting.
//!
//! The clustered layer can hold hundreds of markers, so it is the one rebuild
//! worth gating. The fingerprint is an xxh32 over the (id, position,
//! availability) tuples of the static population, sorted by id — the same
//! set in any order hashes identically, and any change to membership,
//! position, or availability produces a new token.

use xxhash_rust::xxh32::xxh32;

use crate::entities::Asset;

const FINGERPRINT_SEED: u32 = 0x434F_4E56;

/// Deterministic, order-independent fingerprint of the static-asset subset.
///
/// Assets without a position fix contribute nothing; they are not rendered,
/// so their churn must not invalidate the cluster layer.
pub fn fingerprint(static_assets: &[&Asset]) -> u32 {
    let mut tuples: Vec<(i64, u64, u64, bool)> = static_assets
        .iter()
        .filter_map(|a| {
            let pos = a.position()?;
            Some((a.id, pos.lat.to_bits(), pos.lng.to_bits(), a.is_available))
        })
        .collect();
    tuples.sort_unstable_by_key(|t| t.0);

    let mut buf = Vec::with_capacity(tuples.len() * 25);
    for (id, lat, lng, available) in tuples {
        buf.extend_from_slice(&id.to_le_bytes());
        buf.extend_from_slice(&lat.to_le_bytes());
        buf.extend_from_slice(&lng.to_le_bytes());
        buf.push(available as u8);
    }
    xxh32(&buf, FINGERPRINT_SEED)
}
