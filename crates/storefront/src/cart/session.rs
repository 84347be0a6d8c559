//! The process-wide cart session.
//!
//! Holds the current cart and its visibility flag, persists every mutation
//! before publishing it, and reconciles against the Odoo order service on
//! demand. All mutations are serialized through one lock; each runs to
//! completion before the next is admitted, so observers always see a cart
//! whose persisted counterpart is current.

use std::sync::Mutex;

use jaan_core::cart::{self, Cart, CartError};
use jaan_core::catalog::Product;
use jaan_core::types::ProductId;

use crate::cart::CartStorage;
use crate::odoo::{OdooClient, OdooError};

type Observer = Box<dyn Fn(&Cart) + Send + Sync>;

/// Per-session cart state. Exists only between `init` and `reset`.
struct SessionState {
    cart: Cart,
    /// Transient drawer visibility. Not persisted; every fresh session
    /// starts closed.
    is_open: bool,
    /// Monotonic mutation counter. `sync` uses it to detect a cart that
    /// changed while its network exchange was in flight.
    version: u64,
}

/// Process-wide reactive holder of the current cart.
///
/// Created inert; [`CartSession::init`] loads the persisted cart and arms
/// the session. Reading any state before `init` is a programming error and
/// panics - it means the session was not set up during application startup.
pub struct CartSession {
    storage: CartStorage,
    state: Mutex<Option<SessionState>>,
    observers: Mutex<Vec<Observer>>,
}

impl CartSession {
    /// Create an inert session over the given storage slot.
    #[must_use]
    pub const fn new(storage: CartStorage) -> Self {
        Self {
            storage,
            state: Mutex::new(None),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Activate the session: load the persisted cart, close the drawer.
    ///
    /// Calling `init` on an active session reloads from storage and resets
    /// the version counter.
    pub fn init(&self) {
        let cart = self.storage.load();
        tracing::debug!(item_count = cart.item_count, "Cart session initialized");
        *self.lock_state() = Some(SessionState {
            cart,
            is_open: false,
            version: 0,
        });
    }

    /// Return the session to its inert state. For tests.
    pub fn reset(&self) {
        *self.lock_state() = None;
        self.lock_observers().clear();
    }

    /// Register an observer notified synchronously after every cart change.
    pub fn subscribe(&self, observer: impl Fn(&Cart) + Send + Sync + 'static) {
        self.lock_observers().push(Box::new(observer));
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current cart value.
    ///
    /// # Panics
    ///
    /// Panics if the session has not been initialized.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.with_state(|state| state.cart.clone())
    }

    /// Whether the cart drawer is open.
    ///
    /// # Panics
    ///
    /// Panics if the session has not been initialized.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.with_state(|state| state.is_open)
    }

    // =========================================================================
    // Visibility (no persistence side effect)
    // =========================================================================

    /// Open the cart drawer. Returns the new visibility.
    pub fn open_cart(&self) -> bool {
        self.with_state(|state| {
            state.is_open = true;
            state.is_open
        })
    }

    /// Close the cart drawer. Returns the new visibility.
    pub fn close_cart(&self) -> bool {
        self.with_state(|state| {
            state.is_open = false;
            state.is_open
        })
    }

    /// Toggle the cart drawer. Returns the new visibility.
    pub fn toggle_cart(&self) -> bool {
        self.with_state(|state| {
            state.is_open = !state.is_open;
            state.is_open
        })
    }

    // =========================================================================
    // Mutations (persist, then publish)
    // =========================================================================

    /// Add `quantity` units of `product` to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is zero; the
    /// cart is unchanged.
    pub fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<Cart, CartError> {
        self.try_mutate(|current| cart::add(current, product, quantity))
    }

    /// Remove the line for `product_id`, if present.
    pub fn remove_from_cart(&self, product_id: ProductId) -> Cart {
        self.mutate(|current| cart::remove(current, product_id))
    }

    /// Set the quantity of the line for `product_id`; zero removes it.
    pub fn update_quantity(&self, product_id: ProductId, quantity: u32) -> Cart {
        self.mutate(|current| cart::update(current, product_id, quantity))
    }

    /// Empty the cart.
    pub fn clear_cart(&self) -> Cart {
        self.mutate(cart::clear)
    }

    // =========================================================================
    // Sync
    // =========================================================================

    /// Reconcile the cart against the order service.
    ///
    /// Exactly one network exchange is attempted. On success the server's
    /// cart (authoritative for price and stock corrections) replaces the
    /// local one - unless a mutation landed while the exchange was in
    /// flight, in which case the stale server result is discarded and the
    /// newer local cart stands. On failure the local cart is untouched and
    /// the error is returned for the caller to act on.
    ///
    /// # Errors
    ///
    /// Returns the transport or service error from the exchange.
    pub async fn sync(&self, odoo: &OdooClient) -> Result<Cart, OdooError> {
        let (cart, version) = self.with_state(|state| (state.cart.clone(), state.version));
        let server_cart = odoo.sync_cart(&cart).await?;
        Ok(self.apply_synced(version, server_cart))
    }

    /// Adopt a server cart if the local cart has not moved since `started_version`.
    fn apply_synced(&self, started_version: u64, server_cart: Cart) -> Cart {
        // The server is authoritative, but its payload still goes through
        // the same repair path as any other untrusted input.
        let server_cart = server_cart.sanitize();

        let adopted = {
            let mut guard = self.lock_state();
            let state = guard.as_mut().expect(UNINITIALIZED);
            if state.version == started_version {
                self.storage.save(&server_cart);
                state.cart = server_cart.clone();
                state.version += 1;
                true
            } else {
                tracing::warn!(
                    started_version,
                    current_version = state.version,
                    "Cart changed during sync, discarding stale server cart"
                );
                false
            }
        };

        if adopted {
            self.notify(&server_cart);
            server_cart
        } else {
            self.cart()
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Run a store operation against the current cart, persist the result,
    /// make it current, and notify observers.
    ///
    /// The whole read-compute-commit sequence holds the state lock, so
    /// mutations are serialized; the save happens before the new cart
    /// becomes visible, so observers never see a state whose persisted
    /// counterpart is behind.
    fn try_mutate(
        &self,
        op: impl FnOnce(&Cart) -> Result<Cart, CartError>,
    ) -> Result<Cart, CartError> {
        let next = {
            let mut guard = self.lock_state();
            let state = guard.as_mut().expect(UNINITIALIZED);
            let next = op(&state.cart)?;
            self.storage.save(&next);
            state.cart = next.clone();
            state.version += 1;
            next
        };
        self.notify(&next);
        Ok(next)
    }

    /// [`Self::try_mutate`] for operations that cannot fail.
    fn mutate(&self, op: impl FnOnce(&Cart) -> Cart) -> Cart {
        let next = {
            let mut guard = self.lock_state();
            let state = guard.as_mut().expect(UNINITIALIZED);
            let next = op(&state.cart);
            self.storage.save(&next);
            state.cart = next.clone();
            state.version += 1;
            next
        };
        self.notify(&next);
        next
    }

    fn notify(&self, cart: &Cart) {
        for observer in self.lock_observers().iter() {
            observer(cart);
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut guard = self.lock_state();
        let state = guard.as_mut().expect(UNINITIALIZED);
        f(state)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, Option<SessionState>> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_observers(&self) -> std::sync::MutexGuard<'_, Vec<Observer>> {
        self.observers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

const UNINITIALIZED: &str =
    "cart session used before init; call CartSession::init() during application startup";

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use jaan_core::catalog::Product;
    use jaan_core::types::{CategoryId, StockStatus};

    fn product(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            description: String::new(),
            short_description: None,
            price: price.parse().expect("decimal price"),
            compare_price: None,
            sku: format!("SKU-{id:03}"),
            barcode: None,
            category_id: CategoryId::new(1),
            category_name: "Fresh Produce".to_string(),
            images: Vec::new(),
            stock_quantity: 100,
            stock_status: StockStatus::InStock,
            unit: "lb".to_string(),
            weight: None,
            is_featured: false,
            is_new: false,
            created_at: "2024-01-15T00:00:00Z".parse().expect("timestamp"),
            updated_at: "2024-01-20T00:00:00Z".parse().expect("timestamp"),
        }
    }

    fn session() -> CartSession {
        let session = CartSession::new(CartStorage::memory());
        session.init();
        session
    }

    #[test]
    #[should_panic(expected = "cart session used before init")]
    fn test_read_before_init_panics() {
        let session = CartSession::new(CartStorage::memory());
        let _ = session.cart();
    }

    #[test]
    fn test_init_starts_closed_and_empty() {
        let session = session();
        assert_eq!(session.cart(), Cart::empty());
        assert!(!session.is_open());
    }

    #[test]
    fn test_init_restores_persisted_cart() {
        let storage = CartStorage::memory();
        let cart = cart::add(&Cart::empty(), &product(1, "2.99"), 2).expect("add");
        storage.save(&cart);

        let session = CartSession::new(storage);
        session.init();
        assert_eq!(session.cart(), cart);
        // Visibility is transient: restored sessions still start closed.
        assert!(!session.is_open());
    }

    #[test]
    fn test_mutations_persist_before_publish() {
        let session = session();
        session
            .add_to_cart(&product(1, "2.99"), 2)
            .expect("add");

        // The persisted slot matches the visible cart exactly.
        assert_eq!(session.storage.load(), session.cart());

        session.update_quantity(ProductId::new(1), 5);
        assert_eq!(session.storage.load(), session.cart());

        session.remove_from_cart(ProductId::new(1));
        assert_eq!(session.storage.load(), Cart::empty());
    }

    #[test]
    fn test_clear_cart_persists_empty() {
        let session = session();
        session
            .add_to_cart(&product(1, "2.99"), 2)
            .expect("add");
        let cleared = session.clear_cart();
        assert_eq!(cleared, Cart::empty());
        assert_eq!(session.storage.load(), Cart::empty());
    }

    #[test]
    fn test_add_invalid_quantity_leaves_cart_unchanged() {
        let session = session();
        let result = session.add_to_cart(&product(1, "2.99"), 0);
        assert_eq!(result, Err(CartError::InvalidQuantity(0)));
        assert_eq!(session.cart(), Cart::empty());
    }

    #[test]
    fn test_visibility_toggles() {
        let session = session();
        assert!(session.open_cart());
        assert!(session.is_open());
        assert!(!session.close_cart());
        assert!(session.toggle_cart());
        assert!(!session.toggle_cart());
    }

    #[test]
    fn test_visibility_does_not_persist() {
        let session = session();
        session.open_cart();
        // No cart mutation happened, so the slot is still empty.
        assert_eq!(session.storage.load(), Cart::empty());
    }

    #[test]
    fn test_observers_notified_synchronously() {
        let session = session();
        let seen = Arc::new(AtomicU32::new(0));
        let seen_clone = Arc::clone(&seen);
        session.subscribe(move |cart| {
            seen_clone.store(cart.item_count, Ordering::SeqCst);
        });

        session
            .add_to_cart(&product(1, "2.99"), 3)
            .expect("add");
        assert_eq!(seen.load(Ordering::SeqCst), 3);

        session.clear_cart();
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_observer_may_read_session() {
        // Observers run outside the state lock; reading back is safe.
        let session = Arc::new(session());
        let observed = Arc::new(AtomicU32::new(0));
        let session_clone = Arc::clone(&session);
        let observed_clone = Arc::clone(&observed);
        session.subscribe(move |_| {
            observed_clone.store(session_clone.cart().item_count, Ordering::SeqCst);
        });

        session
            .add_to_cart(&product(1, "2.99"), 2)
            .expect("add");
        assert_eq!(observed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reset_returns_to_inert() {
        let session = session();
        session
            .add_to_cart(&product(1, "2.99"), 2)
            .expect("add");
        session.reset();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| session.cart()));
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_synced_replaces_cart_atomically() {
        let session = session();
        session
            .add_to_cart(&product(1, "2.99"), 2)
            .expect("add");
        let version = session.with_state(|state| state.version);

        // Server corrected the price.
        let server_cart =
            cart::add(&Cart::empty(), &product(1, "3.49"), 2).expect("add");
        let adopted = session.apply_synced(version, server_cart.clone());

        // The visible cart is exactly the server cart, not a merge.
        assert_eq!(adopted, server_cart);
        assert_eq!(session.cart(), server_cart);
        assert_eq!(session.storage.load(), server_cart);
    }

    #[test]
    fn test_apply_synced_discards_stale_result() {
        let session = session();
        session
            .add_to_cart(&product(1, "2.99"), 2)
            .expect("add");
        let version = session.with_state(|state| state.version);

        // A mutation lands while the sync exchange is in flight.
        session.update_quantity(ProductId::new(1), 5);
        let local = session.cart();

        let server_cart =
            cart::add(&Cart::empty(), &product(1, "3.49"), 2).expect("add");
        let result = session.apply_synced(version, server_cart);

        // The stale server cart is discarded; the newer local cart stands.
        assert_eq!(result, local);
        assert_eq!(session.cart(), local);
        assert_eq!(session.storage.load(), local);
    }

    #[test]
    fn test_apply_synced_sanitizes_server_cart() {
        let session = session();
        let version = session.with_state(|state| state.version);

        let mut server_cart =
            cart::add(&Cart::empty(), &product(1, "2.99"), 2).expect("add");
        server_cart.total = "999.99".parse().expect("decimal");

        let adopted = session.apply_synced(version, server_cart);
        assert_eq!(adopted.total, "5.98".parse::<rust_decimal::Decimal>().expect("decimal"));
    }
}
