//! Go source generation for ACME DNS provider tables
//!
//! This crate turns upstream provider listings of the lego ACME client into
//! Go source files for the consuming project:
//!
//! - [`DnsProvidersGenerator`]: `dnsproviders/providers.go`, registering an
//!   allowlist of providers with the autocert package
//! - [`AutocertGenerator`]: `autocert/providers.go`, declaring a constant and
//!   a generator entry for every provider directory upstream
//!
//! Listings are read through [`ListingSource`]; [`HttpSource`] performs the
//! real HTTP GET.

mod autocert;
mod dnsproviders;
mod formatter;
mod listing;
mod source;
mod templates;

pub use autocert::{AutocertConfig, AutocertGenerator, DEFAULT_BLACKLIST, DEFAULT_CONTENTS_URL};
pub use dnsproviders::{
    DnsProvidersConfig, DnsProvidersGenerator, DEFAULT_ALLOWLIST, DEFAULT_AUTOCERT_IMPORT,
    DEFAULT_IMPORT_LIST_URL,
};
pub use formatter::go_fmt;
pub use listing::{parse_contents_listing, parse_import_list};
pub use source::{HttpSource, ListingSource};

use std::path::{Path, PathBuf};

/// Rendered Go source with the providers it covers
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Go source text
    pub contents: String,
    /// Provider names emitted, in output order
    pub providers: Vec<String>,
    /// Names that were considered but left out
    pub skipped: Vec<String>,
}

impl GeneratedFile {
    fn into_summary(self, output: &Path) -> GenerationSummary {
        GenerationSummary {
            output: output.to_path_buf(),
            providers: self.providers,
            skipped: self.skipped,
        }
    }
}

/// Result of writing a generated file
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Path written
    pub output: PathBuf,
    /// Provider names emitted, in output order
    pub providers: Vec<String>,
    /// Names that were considered but left out
    pub skipped: Vec<String>,
}
