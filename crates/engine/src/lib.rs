//! # Hookdash Engine
//!
//! The fire-and-confirm core of the deploy widget:
//!
//! - **`executor`**: POSTs to an action endpoint and classifies the outcome
//!   into an `ActionResult`.
//! - **`coordinator`**: serializes triggers so at most one action is in
//!   flight per widget instance, and projects per-item render status.
//! - **`notify`**: the "notify user" capability invoked once per outcome.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use hookdash_engine::{ActionCoordinator, RequestExecutor};
//! use hookdash_types::{Item, ItemId, Notice};
//! use hookdash_util::ReqwestTransport;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let transport = ReqwestTransport::new(&Default::default())?;
//! let coordinator = ActionCoordinator::new(
//!     Arc::new(RequestExecutor::new(transport)),
//!     Arc::new(|notice: Notice| println!("{notice}")),
//! );
//! let item = Item {
//!     id: ItemId(0),
//!     display_name: "Docs".into(),
//!     link_url: "https://docs.example.com".into(),
//!     action_endpoint: Some("https://hooks.example.com/deploy".into()),
//! };
//! if let Some(handle) = coordinator.trigger(&item) {
//!     let report = handle.await?;
//!     println!("{:?}", report.result);
//! }
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod executor;
pub mod notify;

pub use coordinator::{ActionCoordinator, CoordinatorState};
pub use executor::{ActionExecutor, RequestExecutor, classify};
pub use notify::{ChannelNotifier, Notifier};
