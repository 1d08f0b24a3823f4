//! Visitor identity
//!
//! A visitor id is 32 lowercase hex characters built from four random
//! 32-bit blocks. When a session store is available the id is generated
//! once and reused for the rest of the session. Without one, every call
//! produces a fresh id, so the collector will count each page view as a
//! new visitor.

mod session;

pub use session::{MemorySessionStore, SessionStore};

/// Session store key holding the visitor id
pub const VISITOR_ID_KEY: &str = "beacon-visitor-id";

/// Random integer in `[1, 2^32 - 1]`
///
/// Best-effort randomness. Used for visitor ids and cache-busters only,
/// never for anything security sensitive.
pub fn random_u32() -> u32 {
    rand::random_range(1..=u32::MAX)
}

/// Create 32 random hex digits (four zero-padded 8 digit blocks)
pub fn random_hex() -> String {
    (0..4).map(|_| format!("{:08x}", random_u32())).collect()
}

/// Get the id identifying this visitor for the current session
///
/// The stored value is returned unchanged when present.
pub fn visitor_id(store: Option<&dyn SessionStore>) -> String {
    match store {
        Some(store) => store.get_or_insert_with(VISITOR_ID_KEY, &random_hex),
        None => random_hex(),
    }
}
