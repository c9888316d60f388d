//! Uploader Implementations

mod fs_uploader;

pub use fs_uploader::{storage_location, FsUploader};
