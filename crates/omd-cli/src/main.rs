use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use indexmap::IndexMap;

use omd_core::DocGenerator;
use omd_core::config::{self, CONFIG_FILE_NAME, OmdConfig, OutputLayout};
use omd_core::grouping::{self, TagGroups};
use omd_core::parse;
use omd_core::parse::document::OpenApiDocument;
use omd_core::parse::operation::HttpMethod;
use omd_markdown::{MarkdownGenerator, WriteReport, write_files};

#[derive(Parser)]
#[command(
    name = "omd",
    about = "Generate markdown documentation from an OpenAPI document",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate markdown documentation
    Generate(GenerateArgs),

    /// Summarize an OpenAPI document without writing any files
    Inspect {
        /// Path to the OpenAPI document (JSON, or YAML by extension)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new omd configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Flags for `generate`. Anything left unset falls back to `.omd.yaml`,
/// then to the built-in defaults.
#[derive(Args)]
struct GenerateArgs {
    /// Path to the OpenAPI document (JSON, or YAML by extension)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory to write markdown files into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write everything into a single api_documentation.md
    #[arg(long)]
    no_chunk_by_category: bool,

    /// Print $ref pointers without expanding the referenced schema
    #[arg(long)]
    no_inline_refs: bool,

    /// Schema nesting depth at which output is truncated
    #[arg(long)]
    max_depth: Option<usize>,

    /// Schema output size in bytes past which $ref targets are not expanded
    #[arg(long)]
    max_schema_bytes: Option<usize>,
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => cmd_generate(args),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "omd", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OmdConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Apply command-line flags on top of the loaded config.
fn merge_args(mut cfg: OmdConfig, args: GenerateArgs) -> OmdConfig {
    if let Some(input) = args.input {
        cfg.input = input.display().to_string();
    }
    if let Some(output) = args.output {
        cfg.output = output.display().to_string();
    }
    if args.no_chunk_by_category {
        cfg.layout = OutputLayout::Single;
    }
    if args.no_inline_refs {
        cfg.inline_refs = false;
    }
    if let Some(max_depth) = args.max_depth {
        cfg.max_depth = max_depth;
    }
    if let Some(max_schema_bytes) = args.max_schema_bytes {
        cfg.max_schema_bytes = max_schema_bytes;
    }
    cfg
}

fn load_document(path: &Path) -> Result<OpenApiDocument> {
    parse::load(path).with_context(|| format!("failed to load {}", path.display()))
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let cfg = merge_args(try_load_config()?.unwrap_or_default(), args);
    log::debug!("effective config: {cfg:?}");
    let input = PathBuf::from(&cfg.input);

    eprintln!("Loading OpenAPI document from {}", input.display());
    let document = load_document(&input)?;
    let groups = grouping::group_by_tag(&document);
    if groups.is_empty() {
        eprintln!("  note: no operations found under `paths`");
    }

    let options = cfg.render_options();
    eprintln!("Generating documentation");
    eprintln!(
        "  layout: {}",
        match cfg.layout {
            OutputLayout::ByTag => "one file per tag",
            OutputLayout::Single => "single file",
        }
    );
    eprintln!(
        "  $ref values: {}",
        if options.inline_refs { "inlined" } else { "referenced" }
    );

    let generator = MarkdownGenerator::new(cfg.layout);
    let files = generator
        .generate(&document, &groups, &options)
        .map_err(|e| anyhow::anyhow!(e))?;

    let output_dir = PathBuf::from(&cfg.output);
    let report = write_files(&output_dir, &files);
    for path in &report.written {
        eprintln!("  wrote {}", path.display());
    }
    for failure in &report.failures {
        eprintln!("  error: {failure}");
    }

    finish(&report, &groups, &output_dir)
}

fn finish(report: &WriteReport, groups: &TagGroups<'_>, output_dir: &Path) -> Result<()> {
    if !report.is_success() {
        anyhow::bail!(
            "{} of {} files could not be written",
            report.failures.len(),
            report.failures.len() + report.written.len()
        );
    }
    eprintln!(
        "Generated {} files in {} ({} endpoints across {} tags)",
        report.written.len(),
        output_dir.display(),
        grouping::entry_count(groups),
        groups.len()
    );
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let document = load_document(&input)?;
    let groups = grouping::group_by_tag(&document);

    let summary = build_inspect_summary(&document, &groups);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(document: &OpenApiDocument, groups: &TagGroups<'_>) -> serde_json::Value {
    let info = document.info();
    let tags: IndexMap<&str, usize> = grouping::sorted_tags(groups)
        .into_iter()
        .map(|tag| (tag, groups[tag].len()))
        .collect();

    let operations: Vec<serde_json::Value> = document
        .paths()
        .flat_map(|(path, item)| {
            item.iter().filter_map(move |(key, value)| {
                let method = HttpMethod::from_key(key)?;
                let operation = value.as_object()?;
                Some(serde_json::json!({
                    "method": method,
                    "path": path,
                    "summary": operation.get("summary"),
                    "tags": operation.get("tags"),
                }))
            })
        })
        .collect();

    serde_json::json!({
        "openapi": document.version(),
        "info": {
            "title": info.and_then(|i| i.title),
            "version": info.and_then(|i| i.version),
        },
        "servers": document
            .servers()
            .iter()
            .filter_map(|s| s.url)
            .collect::<Vec<_>>(),
        "tags": tags,
        "operations": operations,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
