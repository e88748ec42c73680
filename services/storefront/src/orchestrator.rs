//! Session & cart orchestrator
//!
//! [`Storefront`] owns who is logged in and what is in their cart. Views
//! call its methods for user intents and watch [`StorefrontState`] for
//! changes; they never mutate the state themselves.
//!
//! Invariants kept on every transition:
//! - a non-empty cart implies a session;
//! - the cart is always a projection of the last server cart fetched for
//!   the current session, never an optimistic local edit.

use std::sync::atomic::{AtomicU64, Ordering};

use common::models::{
    CarRecord, ContactRequest, LoginRequest, MessageResponse, Profile, RegisterRequest,
    SellRequest, ServiceRequest, SocialLinks, UserData,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    backend::ShowroomApi,
    cart::CartItem,
    error::ClientResult,
    notify::{Notice, Notifier},
    session::{AuthMode, Credentials},
};

/// What views render from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontState {
    pub session: Option<UserData>,
    pub cart: Vec<CartItem>,
    pub auth_prompt_open: bool,
    pub auth_mode: AuthMode,
    pub cart_open: bool,
    /// An auth submission is waiting for the server; the submit control is disabled
    pub auth_in_flight: bool,
}

impl StorefrontState {
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn cart_count(&self) -> usize {
        self.cart.len()
    }
}

/// How an intent ended, so views can react without diffing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Nothing was sent; the auth prompt is open
    NeedsLogin,
    /// The request failed and the user has been told
    Failed,
    /// The intent was not applicable (disabled control)
    Ignored,
}

/// The storefront's session and cart owner
pub struct Storefront<A, N> {
    api: A,
    notifier: N,
    state: watch::Sender<StorefrontState>,
    /// Bumped whenever the session identity changes; cart results fetched
    /// under an older epoch are dropped
    epoch: AtomicU64,
}

impl<A: ShowroomApi, N: Notifier> Storefront<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        let (state, _) = watch::channel(StorefrontState::default());
        Self {
            api,
            notifier,
            state,
            epoch: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StorefrontState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> StorefrontState {
        self.state.borrow().clone()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Restore the session from the server's cookie, if there is one.
    ///
    /// Never notifies: an absent session is the normal first visit.
    pub async fn check_session(&self) -> Outcome {
        match self.api.current_user().await {
            Ok(Some(user)) => {
                debug!("Restored session for {}", user.phone);
                if self.apply_session(Some(user)) {
                    self.refresh_cart().await;
                }
                Outcome::Completed
            }
            Ok(None) => {
                debug!("No active session");
                self.apply_session(None);
                Outcome::Completed
            }
            Err(e) => {
                debug!("Session check failed: {}", e);
                Outcome::Failed
            }
        }
    }

    /// Log in or register with what the user typed into the auth prompt
    pub async fn authenticate(&self, mode: AuthMode, credentials: Credentials) -> Outcome {
        if mode == AuthMode::Register && credentials.name.trim().is_empty() {
            self.notifier.notify(Notice::error("Please enter your name"));
            return Outcome::Failed;
        }

        let Some(_in_flight) = InFlight::acquire(&self.state) else {
            debug!("Auth submission already in flight");
            return Outcome::Ignored;
        };

        let result = match mode {
            AuthMode::Login => {
                self.api
                    .login(&LoginRequest {
                        phone: credentials.phone,
                        password: credentials.password,
                    })
                    .await
            }
            AuthMode::Register => {
                self.api
                    .register(&RegisterRequest {
                        name: credentials.name.trim().to_string(),
                        phone: credentials.phone,
                        password: credentials.password,
                    })
                    .await
            }
        };

        match result {
            Ok(response) => {
                info!("Authenticated {}", response.user.phone);
                self.apply_session(Some(response.user));
                self.state.send_modify(|s| s.auth_prompt_open = false);
                self.notifier.notify(Notice::success(response.message));
                self.refresh_cart().await;
                Outcome::Completed
            }
            Err(e) => {
                warn!("Authentication failed: {}", e);
                self.notifier
                    .notify(Notice::error(e.user_message("Authentication failed")));
                Outcome::Failed
            }
        }
    }

    /// End the session locally no matter what the server says
    pub async fn logout(&self) -> Outcome {
        if let Err(e) = self.api.logout().await {
            warn!("Logout request failed, clearing the session anyway: {}", e);
        }

        self.state.send_modify(|s| {
            self.clear_session(s);
            s.cart_open = false;
        });
        self.notifier.notify(Notice::info("Logged out"));
        Outcome::Completed
    }

    pub async fn add_to_cart(&self, car_id: &str) -> Outcome {
        let Some(epoch) = self.require_session() else {
            return Outcome::NeedsLogin;
        };

        match self.api.add_to_cart(car_id).await {
            Ok(_) => {
                if self.refresh_cart().await == Outcome::NeedsLogin {
                    return Outcome::NeedsLogin;
                }
                self.notifier.notify(Notice::success("Added to cart!"));
                Outcome::Completed
            }
            Err(e) if e.is_unauthorized() => {
                self.expire_session(epoch);
                Outcome::NeedsLogin
            }
            Err(e) => {
                warn!("Failed to add {} to cart: {}", car_id, e);
                self.notifier
                    .notify(Notice::error(e.user_message("Failed to add to cart")));
                Outcome::Failed
            }
        }
    }

    /// Remove a line from the cart; no confirmation is asked
    pub async fn remove_from_cart(&self, car_id: &str) -> Outcome {
        let Some(epoch) = self.current_epoch() else {
            return Outcome::Ignored;
        };

        match self.api.remove_from_cart(car_id).await {
            Ok(_) => match self.refresh_cart().await {
                Outcome::NeedsLogin => Outcome::NeedsLogin,
                _ => Outcome::Completed,
            },
            Err(e) if e.is_unauthorized() => {
                self.expire_session(epoch);
                Outcome::NeedsLogin
            }
            Err(e) => {
                warn!("Failed to remove {} from cart: {}", car_id, e);
                self.notifier
                    .notify(Notice::error(e.user_message("Failed to remove from cart")));
                Outcome::Failed
            }
        }
    }

    /// Buy everything in the cart
    pub async fn checkout(&self) -> Outcome {
        let Some(epoch) = self.require_session() else {
            return Outcome::NeedsLogin;
        };
        if self.state.borrow().cart.is_empty() {
            return Outcome::Ignored;
        }

        match self.api.checkout().await {
            Ok(response) => {
                info!(
                    "Checked out {} order(s) totalling {}",
                    response.order_ids.len(),
                    response.total
                );
                self.state.send_if_modified(|s| {
                    if self.epoch.load(Ordering::SeqCst) != epoch {
                        return false;
                    }
                    s.cart.clear();
                    s.cart_open = false;
                    true
                });
                self.notifier.notify(Notice::success(response.message));
                Outcome::Completed
            }
            Err(e) if e.is_unauthorized() => {
                self.expire_session(epoch);
                Outcome::NeedsLogin
            }
            Err(e) => {
                warn!("Checkout failed: {}", e);
                self.notifier
                    .notify(Notice::error(e.user_message("Checkout failed")));
                Outcome::Failed
            }
        }
    }

    /// Replace the cart with the server's; does nothing without a session
    pub async fn refresh_cart(&self) -> Outcome {
        let Some(epoch) = self.current_epoch() else {
            return Outcome::Ignored;
        };

        match self.api.cart().await {
            Ok(cars) => {
                let items: Vec<CartItem> = cars.iter().map(CartItem::from).collect();
                let applied = self.state.send_if_modified(|s| {
                    if self.epoch.load(Ordering::SeqCst) != epoch || s.session.is_none() {
                        return false;
                    }
                    s.cart = items;
                    true
                });
                if !applied {
                    debug!("Dropped a cart fetched for a previous session");
                }
                Outcome::Completed
            }
            Err(e) if e.is_unauthorized() => {
                self.expire_session(epoch);
                Outcome::NeedsLogin
            }
            Err(e) => {
                warn!("Failed to load cart: {}", e);
                self.notifier
                    .notify(Notice::error(e.user_message("Failed to load cart")));
                Outcome::Failed
            }
        }
    }

    /// Inventory for the buy page; `None` when it could not be loaded
    pub async fn browse_cars(&self, car_type: Option<&str>) -> Option<Vec<CarRecord>> {
        let car_type = car_type
            .map(str::trim)
            .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("all"));

        match self.api.cars(car_type).await {
            Ok(cars) => Some(cars),
            Err(e) => {
                warn!("Failed to load cars: {}", e);
                self.notifier
                    .notify(Notice::error(e.user_message("Failed to load cars")));
                None
            }
        }
    }

    /// Footer links; all empty when they could not be loaded
    pub async fn social_links(&self) -> SocialLinks {
        self.api.social_links().await.unwrap_or_else(|e| {
            warn!("Failed to load social links: {}", e);
            SocialLinks::default()
        })
    }

    pub async fn submit_sell_request(&self, request: &SellRequest) -> Outcome {
        if self.require_session().is_none() {
            self.notifier.notify(Notice::info("Please login first."));
            return Outcome::NeedsLogin;
        }

        let result = self.api.submit_sell_request(request).await;
        self.report_submission(result)
    }

    pub async fn book_service(&self, request: &ServiceRequest) -> Outcome {
        if self.require_session().is_none() {
            self.notifier.notify(Notice::info("Please login first."));
            return Outcome::NeedsLogin;
        }

        let result = self.api.book_service(request).await;
        self.report_submission(result)
    }

    /// The contact form works without logging in
    pub async fn send_contact(&self, request: &ContactRequest) -> Outcome {
        let result = self.api.send_contact(request).await;
        self.report_submission(result)
    }

    /// Profile page data; `None` when logged out or on failure
    pub async fn load_profile(&self) -> Option<Profile> {
        let epoch = self.require_session()?;

        match self.api.profile().await {
            Ok(profile) => Some(profile),
            Err(e) if e.is_unauthorized() => {
                self.expire_session(epoch);
                None
            }
            Err(e) => {
                warn!("Failed to load profile: {}", e);
                self.notifier
                    .notify(Notice::error(e.user_message("Failed to load profile")));
                None
            }
        }
    }

    pub fn open_auth_prompt(&self) {
        self.state.send_if_modified(|s| !std::mem::replace(&mut s.auth_prompt_open, true));
    }

    pub fn close_auth_prompt(&self) {
        self.state.send_if_modified(|s| std::mem::replace(&mut s.auth_prompt_open, false));
    }

    pub fn set_auth_mode(&self, mode: AuthMode) {
        self.state
            .send_if_modified(|s| std::mem::replace(&mut s.auth_mode, mode) != mode);
    }

    pub fn toggle_auth_mode(&self) {
        self.state.send_modify(|s| s.auth_mode = s.auth_mode.toggled());
    }

    pub fn open_cart(&self) {
        self.state.send_if_modified(|s| !std::mem::replace(&mut s.cart_open, true));
    }

    pub fn close_cart(&self) {
        self.state.send_if_modified(|s| std::mem::replace(&mut s.cart_open, false));
    }

    /// Set or clear the session; returns true when the identity changed.
    ///
    /// A changed identity starts from an empty cart.
    fn apply_session(&self, user: Option<UserData>) -> bool {
        self.state.send_if_modified(|s| {
            if s.session == user {
                return false;
            }
            match user {
                Some(user) => {
                    self.epoch.fetch_add(1, Ordering::SeqCst);
                    s.cart.clear();
                    s.session = Some(user);
                }
                None => self.clear_session(s),
            }
            true
        })
    }

    fn clear_session(&self, s: &mut StorefrontState) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        s.session = None;
        s.cart.clear();
    }

    /// The server rejected the session a request was made under
    fn expire_session(&self, epoch: u64) {
        let expired = self.state.send_if_modified(|s| {
            if self.epoch.load(Ordering::SeqCst) != epoch || s.session.is_none() {
                return false;
            }
            self.clear_session(s);
            s.cart_open = false;
            s.auth_prompt_open = true;
            s.auth_mode = AuthMode::Login;
            true
        });

        if expired {
            info!("Session expired");
            self.notifier.notify(Notice::error("Please log in again"));
        }
    }

    /// Epoch of the live session, or `None` when logged out
    fn current_epoch(&self) -> Option<u64> {
        let state = self.state.borrow();
        state
            .session
            .as_ref()
            .map(|_| self.epoch.load(Ordering::SeqCst))
    }

    /// Like [`Self::current_epoch`], but opens the auth prompt when logged out
    fn require_session(&self) -> Option<u64> {
        let epoch = self.current_epoch();
        if epoch.is_none() {
            self.open_auth_prompt();
        }
        epoch
    }

    fn report_submission(&self, result: ClientResult<MessageResponse>) -> Outcome {
        match result {
            Ok(response) => {
                let message = if response.message.is_empty() {
                    "Success!".to_string()
                } else {
                    response.message
                };
                self.notifier.notify(Notice::success(message));
                Outcome::Completed
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                self.notifier
                    .notify(Notice::error(e.user_message("Request failed.")));
                Outcome::Failed
            }
        }
    }
}

/// Holds `auth_in_flight` for the duration of one submission
struct InFlight<'a> {
    state: &'a watch::Sender<StorefrontState>,
}

impl<'a> InFlight<'a> {
    fn acquire(state: &'a watch::Sender<StorefrontState>) -> Option<Self> {
        let acquired = state.send_if_modified(|s| !std::mem::replace(&mut s.auth_in_flight, true));
        acquired.then_some(Self { state })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.auth_in_flight = false);
    }
}
