use clap::{Parser, Subcommand};
use daystar_site::filter::{self, FilterState, Selection};
use daystar_site::logging::{self, LogConfig};
use daystar_site::{config, generate, output, scan};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Shared flags for commands that write the site.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the write cache and rewrite every page
    #[arg(long)]
    no_cache: bool,
}

/// Filters for the `search` command.
#[derive(clap::Args, Clone)]
struct SearchArgs {
    /// Text matched against programme names and faculties (case-insensitive)
    #[arg(default_value = "")]
    query: String,

    /// Restrict to one level, e.g. "Masters" ("All" for no restriction)
    #[arg(long, default_value = "All")]
    level: String,

    /// Restrict to one faculty, e.g. "Law" ("All" for no restriction)
    #[arg(long, default_value = "All")]
    faculty: String,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "daystar-site")]
#[command(about = "Static site generator for the Daystar University website")]
#[command(long_about = "\
Static site generator for the Daystar University website

The content directory is the data source. The programme catalogue and the
featured posts are TOML files, markdown files become pages.

Content structure:

  content/
  ├── config.toml                  # Site config (optional, merged over defaults)
  ├── programs.toml                # [[program]] level / name / faculty / route
  ├── featured.toml                # [[post]] title / date / category / image
  ├── 010-admissions.md            # Page (numbered = shown in nav)
  ├── 030-about.md                 # Also feeds the home page About section
  ├── 050-portal.md                # Link page (URL-only .md → external nav link)
  ├── law-program.md               # No number prefix = hidden from nav
  └── assets/                      # Static assets → copied to output root

A programme with `route = \"law-program\"` links to /law-program.html;
every other programme opens the generic detail overlay.

Run 'daystar-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".daystar-temp", global = true)]
    temp_dir: PathBuf,

    /// More diagnostics on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report errors on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML site from the scanned manifest
    Generate(CacheArgs),
    /// Run the full pipeline: scan → generate
    Build(CacheArgs),
    /// Validate content directory without building
    Check,
    /// Filter the programme catalogue from the command line
    Search(SearchArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose, cli.quiet)
        .with_ansi(std::io::stderr().is_terminal());
    logging::init_logging(&log_config);

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate(cache_args) => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let report = generate::generate(
                &manifest_path,
                &cli.source,
                &cli.output,
                !cache_args.no_cache,
            )?;
            output::print_generate_output(&report);
        }
        Command::Build(cache_args) => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(
                &manifest_path,
                &cli.source,
                &cli.output,
                !cache_args.no_cache,
            )?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_check_output(&manifest);
            println!("==> Content is valid");
        }
        Command::Search(args) => {
            let manifest = scan::scan(&cli.source)?;
            let catalog = &manifest.catalog;
            let mut state = FilterState::new();
            state.set_query(args.query);
            state.set_level(catalog, Selection::parse(&args.level))?;
            state.set_faculty(catalog, Selection::parse(&args.faculty))?;
            let results = filter::filter(catalog, &state);
            output::print_search_output(&results, &state);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Serialize the scan manifest into the temp dir and return its path.
fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}
