//! Registration table for the allowlisted DNS providers

use crate::listing::parse_import_list;
use crate::source::ListingSource;
use crate::templates::{self, is_go_identifier, DNS_PROVIDERS_TEMPLATE};
use crate::{GenerationSummary, GeneratedFile};
use provider_codegen_common::{
    write_atomic, GeneratorError, ProviderEntry, Result, LEGO_DNS_IMPORT_PREFIX,
};
use std::path::Path;
use tera::Tera;
use tracing::{debug, warn};

/// Upstream Go file importing every DNS provider package
pub const DEFAULT_IMPORT_LIST_URL: &str =
    "https://raw.githubusercontent.com/go-acme/lego/refs/heads/master/providers/dns/zz_gen_dns_providers.go";

/// Package providing `Providers` and `DNSProvider` to the generated code
pub const DEFAULT_AUTOCERT_IMPORT: &str = "github.com/yusing/godoxy/internal/autocert";

/// Providers registered by default, in output order
pub const DEFAULT_ALLOWLIST: &[&str] = &[
    "acmedns",
    "azuredns",
    "cloudflare",
    "cloudns",
    "clouddns",
    "digitalocean",
    "duckdns",
    "edgedns",
    "gcloud",
    "godaddy",
    "googledomains",
    "hetzner",
    "httpreq",
    "ionos",
    "linode",
    "namecheap",
    "netcup",
    "netlify",
    "oraclecloud",
    "ovh",
    "porkbun",
    "rfc2136",
    "scaleway",
    "spaceship",
    "vercel",
    "vultr",
    "timewebcloud",
];

/// Configuration for the registration table generator
#[derive(Debug, Clone)]
pub struct DnsProvidersConfig {
    /// URL of the upstream import list
    pub url: String,
    /// Import path prefix identifying provider packages
    pub import_prefix: String,
    /// Import path of the autocert package
    pub autocert_import: String,
    /// Providers to register, in output order
    pub allowlist: Vec<String>,
    /// Command placed in the `//go:generate` directive
    pub generate_command: String,
}

impl Default for DnsProvidersConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_IMPORT_LIST_URL.to_string(),
            import_prefix: LEGO_DNS_IMPORT_PREFIX.to_string(),
            autocert_import: DEFAULT_AUTOCERT_IMPORT.to_string(),
            allowlist: DEFAULT_ALLOWLIST.iter().map(|s| s.to_string()).collect(),
            generate_command: "provider-codegen dns-providers".to_string(),
        }
    }
}

/// Generator for `dnsproviders/providers.go`
///
/// Registers two dummy providers (`local`, `pseudo`) followed by every
/// allowlisted provider that exists upstream.
pub struct DnsProvidersGenerator {
    config: DnsProvidersConfig,
    tera: Tera,
}

impl DnsProvidersGenerator {
    /// Create a new generator from configuration
    pub fn new(config: DnsProvidersConfig) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { config, tera })
    }

    /// Pick the allowlisted providers out of the upstream import list
    ///
    /// Returns the selected providers in allowlist order and the allowlisted
    /// names that were not found upstream.
    pub fn select(&self, import_list: &str) -> (Vec<ProviderEntry>, Vec<String>) {
        let available = parse_import_list(import_list, &self.config.import_prefix);
        debug!(count = available.len(), "upstream providers");

        let mut selected = Vec::new();
        let mut missing = Vec::new();
        for name in &self.config.allowlist {
            match available.iter().find(|e| &e.name == name) {
                Some(entry) if is_go_identifier(&entry.name) => selected.push(entry.clone()),
                Some(_) => {
                    warn!(provider = %name, "not a valid Go identifier, skipping");
                    missing.push(name.clone());
                }
                None => missing.push(name.clone()),
            }
        }

        (selected, missing)
    }

    /// Render the Go source for `providers`
    pub fn render(&self, providers: &[ProviderEntry]) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("generate_command", &self.config.generate_command);
        context.insert("autocert_import", &self.config.autocert_import);
        context.insert("providers", providers);

        self.tera
            .render(DNS_PROVIDERS_TEMPLATE, &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {:?}", e)))
    }

    /// Fetch the upstream list and render the Go source
    pub fn generate(&self, source: &dyn ListingSource) -> Result<GeneratedFile> {
        let import_list = source.fetch_text(&self.config.url)?;
        let (providers, missing) = self.select(&import_list);
        for name in &missing {
            warn!(provider = %name, "allowlisted provider not found upstream");
        }

        let contents = self.render(&providers)?;
        Ok(GeneratedFile {
            contents,
            providers: providers.into_iter().map(|p| p.name).collect(),
            skipped: missing,
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
    pub fn config(&self) -> &DnsProvidersConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(allowlist: &[&str]) -> DnsProvidersGenerator {
        DnsProvidersGenerator::new(DnsProvidersConfig {
            allowlist: allowlist.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_generator_creation() {
        let result = DnsProvidersGenerator::new(DnsProvidersConfig::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_allowlist_order() {
        let config = DnsProvidersConfig::default();
        assert_eq!(config.allowlist.first().map(String::as_str), Some("acmedns"));
        assert_eq!(
            config.allowlist.last().map(String::as_str),
            Some("timewebcloud")
        );
        assert!(!config.allowlist.iter().any(|p| p == "hostinger"));
    }

    #[test]
    fn test_select_follows_allowlist_order() {
        let list = "\"github.com/go-acme/lego/v4/providers/dns/ovh\"\n\
                    \"github.com/go-acme/lego/v4/providers/dns/cloudflare\"\n\
                    \"github.com/go-acme/lego/v4/providers/dns/bunny\"\n";
        let (selected, missing) = generator(&["cloudflare", "ovh", "duckdns"]).select(list);

        let names: Vec<&str> = selected.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["cloudflare", "ovh"]);
        assert_eq!(missing, vec!["duckdns".to_string()]);
    }

    #[test]
    fn test_render_empty() {
        let rendered = generator(&[]).render(&[]).unwrap();
        assert!(rendered.starts_with("//go:generate provider-codegen dns-providers\n"));
        assert!(rendered.contains("import (\n\t\"github.com/yusing/godoxy/internal/autocert\"\n)"));
        assert!(rendered.contains("Local  = \"local\""));
        assert!(rendered.contains(
            "autocert.Providers[Pseudo] = autocert.DNSProvider(NewDummyDefaultConfig, NewDummyDNSProviderConfig)\n}"
        ));
    }

    #[test]
    fn test_render_providers() {
        let providers = vec![ProviderEntry::lego("cloudflare"), ProviderEntry::lego("ovh")];
        let rendered = generator(&[]).render(&providers).unwrap();

        assert!(rendered.contains(
            "\t\"github.com/yusing/godoxy/internal/autocert\"\n\
             \t\"github.com/go-acme/lego/v4/providers/dns/cloudflare\"\n\
             \t\"github.com/go-acme/lego/v4/providers/dns/ovh\"\n)"
        ));
        assert!(rendered.contains(
            "\tautocert.Providers[\"ovh\"] = autocert.DNSProvider(ovh.NewDefaultConfig, ovh.NewDNSProviderConfig)\n}"
        ));
    }
}
