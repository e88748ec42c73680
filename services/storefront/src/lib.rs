//! Storefront client of the showroom API
//!
//! [`Storefront`] is the session & cart orchestrator the customer-facing
//! views drive; [`BackOffice`] is the employee console. Both talk to the
//! server through the [`ShowroomApi`] / [`BackOfficeApi`] traits, which
//! [`HttpShowroom`] implements over HTTP.
//!
//! ```no_run
//! use storefront::{HttpShowroom, LogNotifier, Storefront, StorefrontConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let api = HttpShowroom::new(&StorefrontConfig::from_env()?)?;
//! let store = Storefront::new(api, LogNotifier);
//! store.check_session().await;
//! store.add_to_cart("car-1").await;
//! # Ok(())
//! # }
//! ```

pub mod back_office;
pub mod backend;
pub mod cart;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod orchestrator;
pub mod session;

pub use back_office::BackOffice;
pub use backend::{BackOfficeApi, ShowroomApi};
pub use cart::CartItem;
pub use config::StorefrontConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpShowroom;
pub use notify::{Confirm, LogNotifier, Notice, NoticeKind, Notifier};
pub use orchestrator::{Outcome, Storefront, StorefrontState};
pub use session::{AuthMode, Credentials};
