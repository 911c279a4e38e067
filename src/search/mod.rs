//! Search filtering and candidate selection over normalized bundles.
//!
//! Selection is a pure function: filter by the requested build kind,
//! deduplicate equivalent versions, rank the survivors newest first.

use std::collections::HashSet;
use std::fmt;

use crate::bundle::{BundleInfo, ReleaseKind, VersionKey};

/// Kind of build the caller is searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFilter {
    /// Every parseable bundle, whatever its classification.
    #[default]
    All,
    /// Numbered release builds only.
    Release,
    /// Debug builds only.
    Debug,
}

impl SearchFilter {
    fn matches(self, kind: ReleaseKind) -> bool {
        match self {
            SearchFilter::All => true,
            SearchFilter::Release => kind == ReleaseKind::Release,
            SearchFilter::Debug => kind == ReleaseKind::Debug,
        }
    }
}

/// How to treat build variants sharing the same numeric version.
///
/// Decides whether `gc64` and `nogc64` builds of the identical version are
/// presented as one candidate or two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantPolicy {
    /// Keep one entry per (version, variant) pair.
    #[default]
    Distinct,
    /// Keep the first-encountered entry per version, whatever its variant.
    Collapse,
}

/// The search produced zero candidates.
///
/// An expected outcome the caller reports to the user, not a failure of the
/// search machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMatchError;

impl fmt::Display for NoMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no packages found for this OS or release version")
    }
}

impl std::error::Error for NoMatchError {}

/// Filter, deduplicate and rank bundles, newest first.
pub fn select(
    bundles: Vec<BundleInfo>,
    filter: SearchFilter,
) -> Result<Vec<BundleInfo>, NoMatchError> {
    select_with(bundles, filter, VariantPolicy::default())
}

/// [`select`] with an explicit variant deduplication policy.
///
/// Ties in the precedence order are broken by release series (descending),
/// then build variant (ascending), so identical inputs always produce the
/// same output.
pub fn select_with(
    bundles: Vec<BundleInfo>,
    filter: SearchFilter,
    variants: VariantPolicy,
) -> Result<Vec<BundleInfo>, NoMatchError> {
    let mut seen: HashSet<(VersionKey, Option<String>)> = HashSet::new();
    let mut picked: Vec<BundleInfo> = Vec::new();

    for bundle in bundles {
        if !filter.matches(bundle.version.kind) {
            continue;
        }
        let variant = match variants {
            VariantPolicy::Distinct => Some(bundle.version.build_variant.clone()),
            VariantPolicy::Collapse => None,
        };
        // First encountered wins.
        if !seen.insert((bundle.version.key(), variant)) {
            continue;
        }
        picked.push(bundle);
    }

    if picked.is_empty() {
        return Err(NoMatchError);
    }

    picked.sort_by(|a, b| {
        b.version
            .cmp_precedence(&a.version)
            .then_with(|| b.release_series.cmp(&a.release_series))
            .then_with(|| a.version.build_variant.cmp(&b.version.build_variant))
    });

    Ok(picked)
}
