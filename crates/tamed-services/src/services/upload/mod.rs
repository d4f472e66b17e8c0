//! Upload inputs and the checks run on them before anything is stored.

pub mod detect;
pub mod extension;
pub mod types;

pub use detect::{detect_content_type, sniff_content_type, DetectError, PeekedReader};
pub use extension::{filename_extension, resolve_extension, ExtensionError};
pub use types::{BytesSource, PathSource, UploadSource, UploadedFile};
