//! # SalesCast Database Crate
//!
//! This crate owns persistence of uploaded sales records.
//!
//! ## Architectural Principles
//!
//! - **Repository Interface:** The rest of the application talks to storage only
//!   through the `SalesRepository` trait, so the service layer and the engine
//!   never see SQL.
//! - **Owner-Scoped Writes:** An upload replaces all records of its owner in a
//!   single operation; records of other owners are never touched.
//! - **Asynchronous & Pooled:** The PostgreSQL implementation uses a `PgPool`
//!   and runs the replace inside one transaction.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: pool construction and schema setup.
//! - `SalesRepository`: the storage interface.
//! - `DbRepository`: the PostgreSQL implementation.
//! - `InMemoryRepository`: a process-local implementation for tests and demos.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::InMemoryRepository;
pub use repository::{DbRepository, ReplaceOutcome, SalesRepository};
