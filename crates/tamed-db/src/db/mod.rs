//! Database repositories for the data access layer
//!
//! `traits` defines the store contracts consumed by the services; `fs` and
//! `postgres` implement them; `factory` picks one from configuration.

pub mod factory;
pub mod fs;
pub mod postgres;
pub mod traits;

pub use factory::{create_post_stores, PostStores};
pub use fs::FsPostStore;
pub use postgres::PgPostStore;
pub use traits::{PostStore, ViewStore};
