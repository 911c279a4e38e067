//! The `search` command: list installable SDK bundles from a catalog.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;

use crate::bundle::{self, BundleInfo};
use crate::platform::Platform;
use crate::search::{SearchFilter, VariantPolicy, select_with};

/// Options for one search invocation, assembled by the CLI layer.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Catalog document path; "-" reads standard input.
    pub catalog: PathBuf,
    pub filter: SearchFilter,
    pub variants: VariantPolicy,
    /// Skip host platform filtering.
    pub all_platforms: bool,
    /// Emit the selection as JSON instead of plain lines.
    pub json: bool,
}

/// Run a catalog search and print the candidates, newest first.
#[tracing::instrument(skip(opts))]
pub fn search(opts: SearchOptions) -> Result<()> {
    let bundles = load_bundles(&opts.catalog, opts.all_platforms)?;

    let found = select_with(bundles, opts.filter, opts.variants)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        for bundle in &found {
            println!("{} {}", bundle.release_series, bundle.version);
        }
    }

    Ok(())
}

/// Read, parse and normalize the catalog document, then drop bundles built
/// for other hosts unless `all_platforms` is set.
fn load_bundles(catalog: &Path, all_platforms: bool) -> Result<Vec<BundleInfo>> {
    let raw = read_catalog(catalog)?;
    let doc: Value =
        serde_json::from_str(&raw).context("Failed to parse catalog document as JSON")?;
    let series_map = doc
        .as_object()
        .context("Catalog root is not an object mapping release series to file lists")?;

    let mut bundles = bundle::collect_bundles(series_map);
    debug!("Parsed {} bundle(s) from the catalog", bundles.len());

    if !all_platforms {
        let platform = Platform::detect();
        bundles.retain(|b| platform.matches(b.version.source_filename()));
        debug!(
            "{} bundle(s) left after filtering for {}/{}",
            bundles.len(),
            platform.os,
            platform.arch
        );
    }

    Ok(bundles)
}

fn read_catalog(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read catalog from stdin")?;
        return Ok(raw);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read catalog file {:?}", path))
}
