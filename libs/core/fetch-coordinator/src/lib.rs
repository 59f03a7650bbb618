//! Single-flight fetch coordination for screen controllers
//!
//! A [`FetchCoordinator`] owns one asynchronous operation and exposes its
//! progress as a [`FetchState`]. Starting it again while an attempt is in
//! flight cancels that attempt; only the newest attempt may move the state to
//! `Normal` or `Error`.
//!
//! ```rust
//! use fetch_coordinator::{FetchCoordinator, FetchState};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let coordinator = FetchCoordinator::new("greeting", |_| async { Ok::<_, String>("hello") });
//!
//! coordinator.start();
//! assert_eq!(coordinator.settled().await, FetchState::Normal);
//! assert_eq!(coordinator.value(), Some("hello"));
//! # }
//! ```

pub mod coordinator;
pub mod state;

pub use coordinator::FetchCoordinator;
pub use state::{FetchState, Transition};
