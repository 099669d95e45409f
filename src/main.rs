use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdsite::Config;

#[derive(Parser)]
#[command(name = "mdsite", version)]
#[command(about = "Generate a static HTML site from Markdown files")]
struct Cli {
    /// Log progress at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the whole site from the content and static directories
    Build(BuildArgs),
    /// Convert a single Markdown file to an HTML fragment
    Render(RenderArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Prefix for root-relative links, e.g. "/my-repo/" (overrides the config)
    base_path: Option<String>,

    /// Site config file; relative paths inside it resolve against its directory
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Markdown content directory
    #[arg(long)]
    content: Option<PathBuf>,

    /// Static asset directory, copied as-is
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,

    /// Page template containing {{ Title }} and {{ Content }}
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep existing files in the output directory
    #[arg(long)]
    no_clean: bool,
}

#[derive(Args)]
struct RenderArgs {
    /// Input Markdown file
    input: PathBuf,

    /// Output HTML file (defaults to input name with .html extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Command::Build(args) => run_build(args),
        Command::Render(args) => run_render(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_build(args: BuildArgs) -> Result<(), mdsite::SiteError> {
    let root = args.config.parent().unwrap_or(Path::new(""));
    let mut config = Config::load(&args.config)?.relative_to(root);

    if let Some(base_path) = args.base_path {
        config.base_path = base_path;
    }
    if let Some(content) = args.content {
        config.content_dir = content;
    }
    if let Some(static_dir) = args.static_dir {
        config.static_dir = static_dir;
    }
    if let Some(template) = args.template {
        config.template = template;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if args.no_clean {
        config.clean = false;
    }

    let summary = mdsite::build(&config)?;
    println!(
        "Built {} pages and copied {} assets into {}",
        summary.pages,
        summary.assets,
        config.output_dir.display()
    );
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<(), mdsite::SiteError> {
    let input = &args.input;
    let markdown = mdsite::read_markdown(input)?;

    let html = mdsite::markdown_to_html(&markdown).map_err(|source| mdsite::SiteError::Markdown {
        path: input.clone(),
        source,
    })?;

    let output = args.output.unwrap_or_else(|| input.with_extension("html"));

    fs::write(&output, html).map_err(|source| mdsite::SiteError::Io {
        path: output.clone(),
        source,
    })?;

    println!("Created {}", output.display());
    Ok(())
}
