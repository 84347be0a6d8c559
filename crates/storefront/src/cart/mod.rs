//! The cart subsystem: persistence and the process-wide session.
//!
//! The pure cart value type and its mutation operations live in
//! [`jaan_core::cart`]; this module owns everything with side effects:
//!
//! - [`CartStorage`] - the single durable slot the cart survives restarts in
//! - [`CartSession`] - the reactive holder UI consumers read and mutate
//!   through, including reconciliation against the Odoo order service

mod session;
mod storage;

pub use session::CartSession;
pub use storage::CartStorage;
