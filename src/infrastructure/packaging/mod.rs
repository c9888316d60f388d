//! Packager Implementations

mod tar_packager;

pub use tar_packager::TarPackager;
