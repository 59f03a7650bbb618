//! Catalog Browser
//!
//! ```text
//! CatalogScreen ──select──► Route::Detail(product) ──► DetailScreen
//!      │                                                   │
//!  list_products                                    refresh_product
//!      └──────────────► ProductUsecase ◄───────────────────┘
//! ```
//!
//! Screens hold nothing but a shared use case and a fetch coordinator, so the
//! binary and the tests wire them the same way.

pub mod config;
pub mod navigation;
pub mod screens;
