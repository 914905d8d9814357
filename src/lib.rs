//! Core library of the product catalog admin tool.
//!
//! The `data` feature exposes the domain model, the in-memory record store
//! and the query engine. The default `app` feature adds forms, the bulk CSV
//! importer, services, configuration and the [`app::CatalogApp`] root.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod events;
#[cfg(feature = "data")]
pub mod query;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod store;

#[cfg(feature = "app")]
pub mod app;
#[cfg(feature = "app")]
pub mod dto;
#[cfg(feature = "app")]
pub mod error_conversions;
#[cfg(feature = "app")]
pub mod forms;
#[cfg(feature = "app")]
pub mod models;
#[cfg(feature = "app")]
pub mod services;
