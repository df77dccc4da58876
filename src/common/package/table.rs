//! Static per-family package name tables.

use crate::common::distro::DistroFamily;

/// Package names to install on one distro family.
#[derive(Debug, Clone, Copy)]
pub struct PackageEntry {
    pub family: DistroFamily,
    pub packages: &'static [&'static str],
}

impl PackageEntry {
    pub const fn new(family: DistroFamily, packages: &'static [&'static str]) -> Self {
        Self { family, packages }
    }
}

/// Lookup table from distro family to package names. Misses are empty.
#[derive(Debug, Clone, Copy)]
pub struct PackageTable(&'static [PackageEntry]);

impl PackageTable {
    pub const fn new(entries: &'static [PackageEntry]) -> Self {
        Self(entries)
    }

    pub fn lookup(&self, family: DistroFamily) -> &'static [&'static str] {
        self.0
            .iter()
            .find(|entry| entry.family == family)
            .map(|entry| entry.packages)
            .unwrap_or(&[])
    }
}
