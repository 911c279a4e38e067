//! Bundle version model and archive filename parsing.
//!
//! Every SDK archive name encodes a dotted version core, an optional build
//! variant, a release classification and a build revision, e.g.
//! `tarantool-enterprise-sdk-nogc64-2.10.6-0-r549.linux.x86_64.tar.gz`.
//! This module turns one such name into a structured [`Version`].

use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Product prefix carried by every catalog filename; it is not part of the
/// build variant.
const PRODUCT_PREFIX: &str = "tarantool-enterprise-sdk";

/// Archive extensions the catalog is known to list.
const ARCHIVE_SUFFIXES: &[&str] = &[".tar.gz", ".tgz", ".tar.xz", ".zip"];

/// Classification of a build derived from filename tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseKind {
    /// Numbered release carrying no classification token.
    #[default]
    Release,
    /// An `rc<N>` token follows the version core.
    ReleaseCandidate,
    /// A `debug` token appears among the build variant tokens.
    Debug,
    /// A classification token this tool does not know (alpha, beta, ...).
    Unrecognized,
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseKind::Release => write!(f, "release"),
            ReleaseKind::ReleaseCandidate => write!(f, "release-candidate"),
            ReleaseKind::Debug => write!(f, "debug"),
            ReleaseKind::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// A filename that could not be interpreted as a bundle version.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    filename: String,
    reason: &'static str,
}

impl ParseError {
    fn new(filename: &str, reason: &'static str) -> Self {
        ParseError {
            filename: filename.to_string(),
            reason,
        }
    }

    /// The offending archive name.
    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse bundle name '{}': {}", self.filename, self.reason)
    }
}

impl std::error::Error for ParseError {}

/// Deduplication identity of a [`Version`].
///
/// Two versions are the same for selection purposes when this key is equal;
/// build variant and rendering differences alone do not make them distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionKey {
    major: u64,
    minor: u64,
    patch: u64,
    additional: u64,
    revision: u64,
    kind: ReleaseKind,
    hash: Option<String>,
}

/// The parsed semantic identity of one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Extra numeric component after the core (`2.10.6-0` carries 0).
    pub additional: u64,
    /// Build counter from the `r<N>` suffix; 0 when absent.
    pub revision: u64,
    pub kind: ReleaseKind,
    /// Short commit hash of a development build; absent for numbered releases.
    pub hash: Option<String>,
    /// Build flavor tokens between the product prefix and the version core
    /// (e.g. "nogc64", "debug-nogc64"). Display and grouping only.
    pub build_variant: String,
    display: String,
    source: String,
}

impl Version {
    /// Parse one raw archive filename into a version.
    ///
    /// Unknown leading tokens are kept in [`build_variant`](Self::build_variant)
    /// and unknown trailing tokens are ignored; only a missing or malformed
    /// `major.minor.patch` core fails the parse.
    pub fn from_bundle_name(name: &str) -> Result<Version, ParseError> {
        let stem = strip_archive_suffix(name);
        let caps = bundle_regex()
            .captures(stem)
            .ok_or_else(|| ParseError::new(name, "no version core found"))?;

        let major = parse_component(&caps["major"], name)?;
        let minor = parse_component(&caps["minor"], name)?;
        let patch = parse_component(&caps["patch"], name)?;
        let additional = match caps.name("additional") {
            Some(m) => parse_component(m.as_str(), name)?,
            None => 0,
        };
        let revision = match caps.name("revision") {
            Some(m) => parse_component(m.as_str(), name)?,
            None => 0,
        };
        let hash = caps.name("hash").map(|m| m.as_str().to_string());

        let build_variant = variant_tokens(caps.name("variant").map_or("", |m| m.as_str()));

        let mut kind = match caps.name("pre").map(|m| m.as_str()) {
            Some("rc") => ReleaseKind::ReleaseCandidate,
            Some(_) => ReleaseKind::Unrecognized,
            None => ReleaseKind::Release,
        };
        // A debug artifact is a debug artifact even when its core carries a
        // classification token.
        if build_variant.split('-').any(|token| token == "debug") {
            kind = ReleaseKind::Debug;
        }

        let display = render_display(&build_variant, &caps);

        Ok(Version {
            major,
            minor,
            patch,
            additional,
            revision,
            kind,
            hash,
            build_variant,
            display,
            source: name.to_string(),
        })
    }

    /// Canonical human-readable rendering: variant, version core, revision.
    pub fn display_string(&self) -> &str {
        &self.display
    }

    /// The archive name this version was parsed from.
    pub fn source_filename(&self) -> &str {
        &self.source
    }

    /// Deduplication identity (see [`VersionKey`]).
    pub fn key(&self) -> VersionKey {
        VersionKey {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            additional: self.additional,
            revision: self.revision,
            kind: self.kind,
            hash: self.hash.clone(),
        }
    }

    /// Precedence order over `(major, minor, patch, additional, revision)`.
    ///
    /// The release kind filters candidates, it never orders them.
    pub fn cmp_precedence(&self, other: &Version) -> Ordering {
        (self.major, self.minor, self.patch, self.additional, self.revision).cmp(&(
            other.major,
            other.minor,
            other.patch,
            other.additional,
            other.revision,
        ))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

fn bundle_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            ^
            (?P<variant>(?:[0-9A-Za-z][0-9A-Za-z_]*-)*?)        # product and variant tokens
            (?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)      # mandatory version core
            (?:-(?P<pre>rc|alpha|beta|entrypoint)(?P<prenum>\d*))?
            (?:-(?P<additional>\d+))?
            (?:-g(?P<hash>[0-9a-f]{9}))?
            (?:-r(?P<revision>\d+))?
            (?:-[0-9A-Za-z_]+)*?                                # tolerated trailing tokens
            (?:\.[0-9A-Za-z_]+)*?                               # platform suffix
            $
            ",
        )
        .expect("bundle name pattern is valid")
    })
}

fn strip_archive_suffix(name: &str) -> &str {
    for suffix in ARCHIVE_SUFFIXES {
        if let Some(stem) = name.strip_suffix(suffix) {
            return stem;
        }
    }
    name
}

/// Drop the product prefix from the captured leading tokens; whatever remains
/// is the build variant.
fn variant_tokens(raw: &str) -> String {
    let tokens = raw.strip_suffix('-').unwrap_or(raw);
    let tokens = tokens
        .strip_prefix(PRODUCT_PREFIX)
        .map(|rest| rest.strip_prefix('-').unwrap_or(rest))
        .unwrap_or(tokens);
    tokens.to_string()
}

fn parse_component(digits: &str, name: &str) -> Result<u64, ParseError> {
    digits
        .parse::<u64>()
        .map_err(|_| ParseError::new(name, "version component out of range"))
}

/// Rebuild the canonical display string from the matched tokens. Re-parsing
/// this string reproduces every structured field.
fn render_display(build_variant: &str, caps: &regex::Captures<'_>) -> String {
    let mut out = String::new();
    if !build_variant.is_empty() {
        out.push_str(build_variant);
        out.push('-');
    }
    out.push_str(&caps["major"]);
    out.push('.');
    out.push_str(&caps["minor"]);
    out.push('.');
    out.push_str(&caps["patch"]);
    if let Some(pre) = caps.name("pre") {
        out.push('-');
        out.push_str(pre.as_str());
        if let Some(num) = caps.name("prenum") {
            out.push_str(num.as_str());
        }
    }
    if let Some(additional) = caps.name("additional") {
        out.push('-');
        out.push_str(additional.as_str());
    }
    if let Some(hash) = caps.name("hash") {
        out.push_str("-g");
        out.push_str(hash.as_str());
    }
    if let Some(revision) = caps.name("revision") {
        out.push_str("-r");
        out.push_str(revision.as_str());
    }
    out
}
