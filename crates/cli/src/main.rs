//! provider-codegen CLI
//!
//! Build-time tooling: normalizes the generated Swagger document and
//! regenerates the Go DNS provider tables from the upstream lego repository.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use provider_codegen_generator::{
    go_fmt, AutocertConfig, AutocertGenerator, DnsProvidersConfig, DnsProvidersGenerator,
    GenerationSummary, HttpSource, DEFAULT_AUTOCERT_IMPORT, DEFAULT_CONTENTS_URL,
    DEFAULT_IMPORT_LIST_URL,
};
use provider_codegen_normalizer::{fix_swagger_file, DEFAULT_SWAGGER_PATH};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "provider-codegen")]
#[command(version, about = "Build-time code generators for DNS providers and Swagger docs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize the generated Swagger document in place
    #[command(after_help = "EXAMPLES:\n  \
        # Fix the default document\n  \
        provider-codegen fix-swagger\n\n  \
        # Fix a document elsewhere\n  \
        provider-codegen fix-swagger --path docs/swagger.json")]
    FixSwagger {
        /// Path to the Swagger JSON file
        #[arg(short, long, default_value = DEFAULT_SWAGGER_PATH)]
        path: PathBuf,
    },

    /// Generate the DNS provider registration table
    #[command(after_help = "EXAMPLES:\n  \
        # Regenerate with the default allowlist\n  \
        provider-codegen dns-providers --output internal/dnsproviders/providers.go\n\n  \
        # Register only a few providers\n  \
        provider-codegen dns-providers --allow cloudflare,ovh,duckdns")]
    DnsProviders {
        /// URL of the upstream Go file importing every provider
        #[arg(long, default_value = DEFAULT_IMPORT_LIST_URL)]
        url: String,

        /// Comma-separated list of providers to register (default allowlist if not specified)
        #[arg(long, value_delimiter = ',')]
        allow: Option<Vec<String>>,

        /// Import path of the autocert package
        #[arg(long, default_value = DEFAULT_AUTOCERT_IMPORT)]
        autocert_import: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate the autocert provider constants and generator map
    #[command(after_help = "EXAMPLES:\n  \
        # Regenerate with the default blacklist\n  \
        provider-codegen autocert-providers --output internal/autocert/providers.go\n\n  \
        # Authenticate to avoid the GitHub API rate limit\n  \
        GITHUB_TOKEN=... provider-codegen autocert-providers")]
    AutocertProviders {
        /// URL of the GitHub contents listing of the provider directory
        #[arg(long, default_value = DEFAULT_CONTENTS_URL)]
        url: String,

        /// Comma-separated list of directories to leave out (default blacklist if not specified)
        #[arg(long, value_delimiter = ',')]
        deny: Option<Vec<String>>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Options shared by the Go generators
#[derive(Args)]
struct OutputArgs {
    /// Output Go file
    #[arg(short, long, default_value = "providers.go")]
    output: PathBuf,

    /// Skip running `go fmt` on the output
    #[arg(long)]
    no_fmt: bool,

    /// GitHub token for authenticated requests
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::FixSwagger { path } => {
            fix_swagger_command(&path, cli.verbose)?;
        }
        Commands::DnsProviders {
            url,
            allow,
            autocert_import,
            output,
        } => {
            let mut config = DnsProvidersConfig {
                url,
                autocert_import,
                ..Default::default()
            };
            if let Some(allow) = allow {
                config.allowlist = allow;
            }
            dns_providers_command(config, &output, cli.verbose)?;
        }
        Commands::AutocertProviders { url, deny, output } => {
            let mut config = AutocertConfig {
                url,
                ..Default::default()
            };
            if let Some(deny) = deny {
                config.blacklist = deny;
            }
            autocert_providers_command(config, &output, cli.verbose)?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn fix_swagger_command(path: &Path, verbose: bool) -> Result<()> {
    println!(
        "{} Normalizing Swagger document: {}",
        "→".cyan(),
        path.display()
    );

    let report = fix_swagger_file(path)
        .with_context(|| format!("Failed to normalize {}", path.display()))?;

    if report.is_unchanged() {
        println!("{} Already normalized, nothing changed", "✓".green());
        return Ok(());
    }

    println!("\n{}", "✓ Normalization complete!".green().bold());
    if verbose {
        println!("  x-nullable defaulted: {}", report.nullable_defaulted);
        println!("  x-omitempty defaulted: {}", report.omitempty_defaulted);
        println!("  operationId promoted: {}", report.operation_ids);
    }

    Ok(())
}

fn dns_providers_command(
    config: DnsProvidersConfig,
    args: &OutputArgs,
    verbose: bool,
) -> Result<()> {
    println!("{} Fetching provider import list: {}", "→".cyan(), config.url);

    if verbose {
        println!("  Allowlist: {}", config.allowlist.join(", "));
        println!("  Autocert import: {}", config.autocert_import);
        println!("  Output: {}", args.output.display());
    }

    let source = HttpSource::with_token(args.github_token.clone())
        .context("Failed to create HTTP client")?;
    let generator = DnsProvidersGenerator::new(config).context("Failed to create generator")?;
    let summary = generator
        .generate_to_file(&source, &args.output)
        .context("Failed to generate DNS provider table")?;

    if !summary.skipped.is_empty() {
        eprintln!(
            "{} Skipped allowlisted providers: {}",
            "⚠".yellow(),
            summary.skipped.join(", ")
        );
    }

    finish(&summary, args, verbose)
}

fn autocert_providers_command(
    config: AutocertConfig,
    args: &OutputArgs,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Fetching provider directory listing: {}",
        "→".cyan(),
        config.url
    );

    if verbose {
        println!("  Blacklist: {}", config.blacklist.join(", "));
        println!("  Output: {}", args.output.display());
    }

    let source = HttpSource::with_token(args.github_token.clone())
        .context("Failed to create HTTP client")?;
    let generator = AutocertGenerator::new(config).context("Failed to create generator")?;
    let summary = generator
        .generate_to_file(&source, &args.output)
        .context("Failed to generate autocert provider constants")?;

    if verbose && !summary.skipped.is_empty() {
        println!("  Skipped: {}", summary.skipped.join(", "));
    }

    finish(&summary, args, verbose)
}

/// Format the written file and print the summary
fn finish(summary: &GenerationSummary, args: &OutputArgs, verbose: bool) -> Result<()> {
    println!(
        "{} Generated {} providers",
        "✓".green(),
        summary.providers.len()
    );

    if verbose {
        for name in &summary.providers {
            println!("  • {}", name.cyan());
        }
    }

    if args.no_fmt {
        println!("{} Skipping go fmt", "→".cyan());
    } else {
        println!("{} Running go fmt...", "→".cyan());
        go_fmt(&summary.output)
            .with_context(|| format!("Failed to format {}", summary.output.display()))?;
    }

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    println!("  📄 {}", summary.output.display());

    Ok(())
}
