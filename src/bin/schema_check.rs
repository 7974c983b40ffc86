//! Schema Check CLI
//!
//! Verifies the section catalog against the built-in factories, validates
//! section content files and prints the JSON Schema of a family.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use doc_schemas::config::OutputFormat;
use doc_schemas::{DocumentType, FactoryRegistry, Issue, SchemaComposer, SchemaConfig, SchemaError};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-check")]
#[command(about = "Verify the section catalog and validate section content")]
struct Cli {
    /// Config file layered over the default locations
    #[arg(short, long)]
    config: Option<String>,

    /// Catalog directory (overrides config; embedded catalog when unset)
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every section has a factory and compose all families
    Verify,

    /// Validate a JSON content file against a family or one section
    Validate {
        /// Family id
        #[arg(short, long)]
        family: u32,
        /// Document type (plan or task)
        #[arg(short, long)]
        doc_type: DocumentType,
        /// Validate a single section by dotted id
        #[arg(short, long)]
        section: Option<String>,
        /// JSON content file
        file: PathBuf,
    },

    /// Print the JSON Schema of a family
    Describe {
        /// Family id
        #[arg(short, long)]
        family: u32,
        /// Document type (plan or task)
        #[arg(short, long)]
        doc_type: DocumentType,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = SchemaConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    if let Some(path) = cli.catalog {
        config.catalog.path = Some(path);
    }
    let output_format = config.report.output_format;
    let verified_at_load = config.catalog.verify;

    let catalog = config.load_catalog()?;
    let registry = FactoryRegistry::builtin();
    let composer = SchemaComposer::new(&catalog, &registry);

    match cli.command {
        Commands::Verify => {
            println!("🔍 Verifying catalog ({} families, {})", catalog.len(), &catalog.fingerprint()[..12]);
            if !verified_at_load {
                registry.verify(&catalog)?;
            }

            for family in catalog.families() {
                for document_type in DocumentType::ALL {
                    if !family.applies_to(document_type) {
                        println!("  ⏭️  {} {} - omitted", family.id, document_type);
                        continue;
                    }
                    let schema = composer.compose(family.id, document_type)?;
                    println!(
                        "  ✅ {} {} ({}) - {} keys, {} sections",
                        family.id,
                        document_type,
                        family.name,
                        schema.shape_keys().len(),
                        schema.by_id().len()
                    );
                }
            }

            println!();
            println!("✅ Catalog and factories agree");
            Ok(())
        }

        Commands::Validate { family, doc_type, section, file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", file.display()))?;

            let schema = composer.compose(family, doc_type)?;
            let result = match &section {
                Some(id) => {
                    catalog
                        .family(family)?
                        .section(id)
                        .ok_or_else(|| SchemaError::UnknownSection { family, id: id.clone() })?;
                    match schema.validate_section(id, &value) {
                        Some(result) => result,
                        None => bail!("Section {} is omitted for {} documents", id, doc_type),
                    }
                }
                None => schema.validate(&value),
            };

            let target = section.unwrap_or_else(|| format!("family {}", family));
            match result {
                Ok(data) => {
                    println!("✅ {} ({}) - valid", target, doc_type);
                    println!("{}", output_format.render(&data)?);
                    Ok(())
                }
                Err(issues) => {
                    report_issues(&target, doc_type, &issues, output_format)?;
                    std::process::exit(1);
                }
            }
        }

        Commands::Describe { family, doc_type } => {
            let schema = composer.compose(family, doc_type)?;
            println!("{}", output_format.render(&schema.to_json_schema())?);
            Ok(())
        }
    }
}

fn report_issues(
    target: &str,
    doc_type: DocumentType,
    issues: &[Issue],
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Pretty => {
            println!("❌ {} ({}) - {} issue(s)", target, doc_type, issues.len());
            for issue in issues {
                println!("   └─ {}", issue);
            }
        }
        OutputFormat::Compact => {
            println!("{}", serde_json::to_string(issues)?);
        }
    }
    Ok(())
}
