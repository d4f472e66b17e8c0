//! Tamed Services Library
//!
//! The service layer on top of the stores: the post creation pipeline that turns a
//! batch of uploaded files into stored media plus post records, and the read-only
//! view services for arts and users.

pub mod services;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use services::post::{CreateFileError, PostService};
pub use services::upload::{
    detect_content_type, resolve_extension, sniff_content_type, BytesSource, DetectError,
    ExtensionError, PathSource, PeekedReader, UploadSource, UploadedFile,
};
pub use services::view::ViewService;
pub use services::{Services, Stores};
