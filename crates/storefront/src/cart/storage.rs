//! Durable storage for the cart.
//!
//! One slot holds the serialized cart. Persistence is a best-effort cache,
//! not a transactional guarantee: the in-memory cart stays authoritative for
//! the session, so read and write failures are logged and swallowed - they
//! must never fail a mutation.

use std::path::PathBuf;
use std::sync::Mutex;

use jaan_core::cart::Cart;

/// The durable slot holding the serialized cart.
#[derive(Debug)]
pub enum CartStorage {
    /// A JSON file at a configured path.
    File(PathBuf),
    /// An in-process slot. Used by tests and ephemeral deployments.
    Memory(Mutex<Option<String>>),
    /// No storage available (non-interactive contexts): loads yield the
    /// empty cart and saves do nothing.
    Disabled,
}

impl CartStorage {
    /// Storage backed by a JSON file at `path`.
    #[must_use]
    pub fn file(path: PathBuf) -> Self {
        Self::File(path)
    }

    /// In-process storage that does not survive restarts.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Mutex::new(None))
    }

    /// Storage that is a no-op in both directions.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::Disabled
    }

    /// Load the persisted cart.
    ///
    /// An absent slot or a payload that fails to parse yields the canonical
    /// empty cart; the failure is logged as a diagnostic only. A parsed cart
    /// is sanitized before being trusted.
    #[must_use]
    pub fn load(&self) -> Cart {
        let Some(raw) = self.read_raw() else {
            return Cart::empty();
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => cart.sanitize(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored cart is corrupt, starting empty");
                Cart::empty()
            }
        }
    }

    /// Persist the cart, best-effort.
    ///
    /// Write failures are logged and swallowed; the caller's in-memory cart
    /// remains correct for the session either way.
    pub fn save(&self, cart: &Cart) {
        let payload = match serde_json::to_string(cart) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cart for persistence");
                return;
            }
        };

        match self {
            Self::File(path) => {
                if let Err(e) = std::fs::write(path, payload) {
                    tracing::warn!(error = %e, path = %path.display(), "Failed to persist cart");
                }
            }
            Self::Memory(slot) => match slot.lock() {
                Ok(mut slot) => *slot = Some(payload),
                Err(e) => tracing::warn!(error = %e, "Cart memory slot poisoned"),
            },
            Self::Disabled => {}
        }
    }

    fn read_raw(&self) -> Option<String> {
        match self {
            Self::File(path) => match std::fs::read_to_string(path) {
                Ok(raw) => Some(raw),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "Failed to read stored cart");
                    None
                }
            },
            Self::Memory(slot) => match slot.lock() {
                Ok(slot) => slot.clone(),
                Err(e) => {
                    tracing::warn!(error = %e, "Cart memory slot poisoned");
                    None
                }
            },
            Self::Disabled => None,
        }
    }
}
