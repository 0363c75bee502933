//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories only translate between row structs and domain types; the
//! rules live in the domain services. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) never leave this module.
//!
//! # Example
//!
//! ```no_run
//! use recipe_box::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_favorite_repository;
mod diesel_recipe_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
