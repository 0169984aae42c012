//! # ecoscrap-api
//!
//! REST backend for the EcoScrap marketplace, where households sell
//! scrap ("customers"), collection businesses list recycled material
//! ("dealers"), and moderators approve listings ("admins").
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP + session cookie)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── CurrentUser extractor (auth/)
//!     │
//!     ├── Account / Catalog / Pickup / Order /
//!     │   Reference / Dashboard services (service/)
//!     │
//!     ├── Entities and visibility rules (domain/)
//!     │
//!     └── MarketStore (persistence/)
//!         ├── PostgreSQL (sqlx)
//!         └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
