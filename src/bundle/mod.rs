//! Catalog bundles: the parsed, selectable entries of a release catalog.
//!
//! The catalog arrives as an untyped mapping from a release-series label
//! (e.g. "2.10") to a list of raw archive filenames. Normalization walks
//! that mapping once and produces flat, immutable [`BundleInfo`] values for
//! the selector to filter and rank.

mod version;

pub use version::{ParseError, ReleaseKind, Version, VersionKey};

use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

/// Product family label attached to every catalog entry.
pub const PACKAGE_NAME: &str = "enterprise";

/// One selectable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleInfo {
    pub version: Version,
    /// Catalog grouping label this entry was listed under (e.g. "2.10").
    pub release_series: String,
    /// Product family label, fixed for the whole catalog.
    pub package_name: String,
}

/// Flatten a raw release-series -> filenames mapping into parsed bundles.
///
/// The value side of the mapping is untyped at this boundary: series values
/// that are not lists, entries that are not strings, and filenames that fail
/// to parse are skipped, not propagated. An empty result is not an error
/// here; the selector reports the aggregate no-match condition.
pub fn collect_bundles(catalog: &Map<String, Value>) -> Vec<BundleInfo> {
    let mut bundles = Vec::new();
    let mut skipped = 0usize;

    for (series, entry) in catalog {
        let Some(names) = entry.as_array() else {
            debug!("Skipping catalog key '{}': value is not a list", series);
            skipped += 1;
            continue;
        };

        for value in names {
            let Some(name) = value.as_str() else {
                debug!("Skipping non-string entry under '{}'", series);
                skipped += 1;
                continue;
            };
            match Version::from_bundle_name(name) {
                Ok(version) => bundles.push(BundleInfo {
                    version,
                    release_series: series.clone(),
                    package_name: PACKAGE_NAME.to_string(),
                }),
                Err(err) => {
                    debug!("Skipping catalog entry: {}", err);
                    skipped += 1;
                }
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {} catalog entry(ies) during normalization", skipped);
    }

    bundles
}
