//! Package management across Linux distribution families.
//!
//! - [`PackageManager`]: the native manager of each family
//! - [`PackageTable`]: static family → package-name tables used by installers
//! - [`install_packages`]: install a list of names with the right manager

mod install;
mod manager;
mod table;

pub use install::install_packages;
pub use manager::PackageManager;
pub use table::{PackageEntry, PackageTable};
