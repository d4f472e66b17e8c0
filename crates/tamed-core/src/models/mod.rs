//! Data models for the application
//!
//! Posts are the records the upload pipeline creates; arts and users are the
//! read-only view records served by the view service.

mod post;
mod view;

pub use post::*;
pub use view::*;
