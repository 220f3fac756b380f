//! Provider name constants and generator map for every upstream DNS provider

use crate::listing::parse_contents_listing;
use crate::source::ListingSource;
use crate::templates::{self, is_go_identifier, AUTOCERT_PROVIDERS_TEMPLATE};
use crate::{GenerationSummary, GeneratedFile};
use provider_codegen_common::{
    write_atomic, DirEntry, EntryKind, GeneratorError, ProviderEntry, Result,
    LEGO_DNS_IMPORT_PREFIX,
};
use std::path::Path;
use tera::Tera;
use tracing::debug;

/// GitHub contents API listing of the upstream provider directory
pub const DEFAULT_CONTENTS_URL: &str =
    "https://api.github.com/repos/go-acme/lego/contents/providers/dns";

/// Directories that are not usable providers: shared code and deprecated ones
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "internal",
    "azure",
    "brandit",
    "cloudxns",
    "dnspod",
    "mythicbeasts",
    "yandexcloud",
];

/// Configuration for the provider constants generator
#[derive(Debug, Clone)]
pub struct AutocertConfig {
    /// URL of the directory listing
    pub url: String,
    /// Import path prefix prepended to each directory name
    pub import_prefix: String,
    /// Directory names to leave out
    pub blacklist: Vec<String>,
    /// Command placed in the `//go:generate` directive
    pub generate_command: String,
}

impl Default for AutocertConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CONTENTS_URL.to_string(),
            import_prefix: LEGO_DNS_IMPORT_PREFIX.to_string(),
            blacklist: DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect(),
            generate_command: "provider-codegen autocert-providers".to_string(),
        }
    }
}

/// Generator for `autocert/providers.go`
///
/// Emits one constant and one map entry per provider directory upstream, in
/// listing order, after the `local` and `pseudo` dummies.
pub struct AutocertGenerator {
    config: AutocertConfig,
    tera: Tera,
}

impl AutocertGenerator {
    /// Create a new generator from configuration
    pub fn new(config: AutocertConfig) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { config, tera })
    }

    /// Keep the provider directories of a listing
    ///
    /// Returns the selected providers and the names of skipped directories.
    /// Plain files are dropped without being reported.
    pub fn select(&self, entries: &[DirEntry]) -> (Vec<ProviderEntry>, Vec<String>) {
        let mut selected = Vec::new();
        let mut skipped = Vec::new();

        for entry in entries {
            if entry.kind != EntryKind::Dir {
                continue;
            }
            if self.config.blacklist.iter().any(|b| b == &entry.name) {
                debug!(provider = %entry.name, "blacklisted");
                skipped.push(entry.name.clone());
                continue;
            }
            if !is_go_identifier(&entry.name) {
                debug!(provider = %entry.name, "not a valid Go identifier");
                skipped.push(entry.name.clone());
                continue;
            }
            selected.push(ProviderEntry {
                name: entry.name.clone(),
                import_path: format!("{}{}", self.config.import_prefix, entry.name),
            });
        }

        (selected, skipped)
    }

    /// Render the Go source for `providers`
    pub fn render(&self, providers: &[ProviderEntry]) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("generate_command", &self.config.generate_command);
        context.insert("providers", providers);

        self.tera
            .render(AUTOCERT_PROVIDERS_TEMPLATE, &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {:?}", e)))
    }

    /// Fetch the directory listing and render the Go source
    pub fn generate(&self, source: &dyn ListingSource) -> Result<GeneratedFile> {
        let listing = source.fetch_text(&self.config.url)?;
        let entries = parse_contents_listing(&listing)?;
        debug!(count = entries.len(), "listing entries");

        let (providers, skipped) = self.select(&entries);
        let contents = self.render(&providers)?;

        Ok(GeneratedFile {
            contents,
            providers: providers.into_iter().map(|p| p.name).collect(),
            skipped,
        })
    }

    /// Generate and write the Go source to `output`
    pub fn generate_to_file(
        &self,
        source: &dyn ListingSource,
        output: &Path,
    ) -> Result<GenerationSummary> {
        let generated = self.generate(source)?;
        write_atomic(output, generated.contents.as_bytes()).map_err(|e| {
            GeneratorError::Generation(format!("Failed to write {}: {}", output.display(), e))
        })?;

        Ok(generated.into_summary(output))
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &AutocertConfig {
        &self.config
    }
}
