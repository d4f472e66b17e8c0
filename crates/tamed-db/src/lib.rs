//! Tamed Database Library
//!
//! Persistence for post metadata and the art/user view records. Two backends share
//! the same traits: a filesystem store keeping one JSON document per record, and a
//! Postgres store.

pub mod db;

pub use db::{
    create_post_stores, FsPostStore, PgPostStore, PostStore, PostStores, ViewStore,
};
