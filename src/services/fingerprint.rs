//! Device fingerprint from the client user-agent.
//!
//! A user-agent string is attacker-controllable, so this is a weak device
//! identity by construction; the policy accepts that trade-off and treats
//! the fingerprint as "same browser on the same device" only.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of the raw user-agent string. Callers pass the empty
/// string when the header is absent.
pub fn device_id(user_agent: &str) -> String {
    let hash = Sha256::digest(user_agent.as_bytes());
    hex::encode(hash)
}
