//! CLI module for seo-atlas

mod args;

pub use args::{Args, Command, SourceArgs};

use crate::config::Config;
use crate::data::DataLoader;
use crate::error::{Error, Result};
use crate::index::{ResolvedPage, Site};
use crate::links::{Link, PageLinks};
use crate::output::{BuildStats, SitemapWriter, TemplateEngine};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Default config file, read when present
const DEFAULT_CONFIG: &str = "seo-atlas.toml";

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG wins over --verbose
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Build {
            source,
            output,
            base_url,
            min_priority,
        } => {
            let cfg = load_config(&source, output, base_url, min_priority)?;
            let site = load_site(&cfg)?;

            println!("Writing output...");
            let writer = SitemapWriter::new(&cfg)?;
            let report = writer.write(&site)?;

            println!("{}", report.summary());
            println!("Fingerprint: {}", report.fingerprint);
            Ok(())
        }

        Command::Stats {
            source,
            min_priority,
            json,
        } => {
            let cfg = load_config(&source, None, None, min_priority)?;
            let site = load_site(&cfg)?;
            let stats = BuildStats::collect(&site, &cfg.site.name, cfg.sitemap.min_priority);

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                let engine = TemplateEngine::new()?;
                print!("{}", engine.render_stats(&stats)?);
            }
            Ok(())
        }

        Command::Route { slug, source, json } => {
            let cfg = load_config(&source, None, None, None)?;
            let site = load_site(&cfg)?;
            let page = site.router().require(&slug)?;
            let target = page.target();
            let copy = site.prose().compose(&page);

            if json {
                let value = serde_json::json!({
                    "slug": target.slug(),
                    "target": target,
                    "indexed": site.index().contains(&target.slug()),
                    "copy": copy,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{} -> {}", target.slug(), page.page_type());
                print_entities(&page);
                if !site.index().contains(&target.slug()) {
                    println!("  (not in page index)");
                }
                println!("  headline: {}", copy.headline);
            }
            Ok(())
        }

        Command::Links { slug, source, json } => {
            let cfg = load_config(&source, None, None, None)?;
            let site = load_site(&cfg)?;
            let target = site.router().require(&slug)?.target();
            let links = site
                .links(&cfg.links, &cfg.site.home_label)
                .page_links(&target)
                .ok_or_else(|| Error::not_found(slug.as_str()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&links)?);
            } else {
                print_links(&links);
            }
            Ok(())
        }

        Command::Validate { source } => {
            let cfg = load_config(&source, None, None, None)?;
            match load_site(&cfg) {
                Ok(site) => {
                    let counts = site.index().count_by_type();
                    println!(
                        "Data OK: {} locations, {} services, {} models, {} pages",
                        site.locations().len(),
                        site.catalog().services().len(),
                        site.catalog().models().len(),
                        counts.total()
                    );
                    Ok(())
                }
                Err(Error::Integrity(report)) => {
                    println!("Found {} problem(s):", report.violations().len());
                    for violation in report.violations() {
                        println!("  - {}", violation);
                    }
                    Err(Error::Integrity(report))
                }
                Err(e) => Err(e),
            }
        }

        Command::Version => {
            println!("seo-atlas {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Config from --config, ./seo-atlas.toml or defaults, with CLI overrides
fn load_config(
    source: &SourceArgs,
    output: Option<PathBuf>,
    base_url: Option<String>,
    min_priority: Option<u8>,
) -> Result<Config> {
    let mut cfg = match &source.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG)),
    };

    cfg.merge_cli(source.data.clone(), output, base_url, min_priority);
    cfg.validate()?;
    Ok(cfg)
}

fn load_site(cfg: &Config) -> Result<Site> {
    let loader = DataLoader::new(&cfg.data)?;
    let data = loader.load(&cfg.data.directory)?;
    Site::build(data)
}

fn print_entities(page: &ResolvedPage<'_>) {
    match page {
        ResolvedPage::Location { location } => {
            println!("  location: {} ({})", location.name, location.kind.label());
        }
        ResolvedPage::ServiceLocation { service, location } => {
            println!("  service: {}", service.name);
            println!("  location: {} ({})", location.name, location.kind.label());
        }
        ResolvedPage::Vehicle { brand, model } => {
            println!("  brand: {}", brand.name);
            println!("  model: {}", model.name);
        }
    }
}

fn print_links(links: &PageLinks) {
    let trail: Vec<&str> = links.breadcrumbs.iter().map(|c| c.label.as_str()).collect();
    println!("Breadcrumbs: {}", trail.join(" > "));

    let sections: [(&str, &[Link]); 5] = [
        ("Children", links.children.as_slice()),
        ("Siblings", links.siblings.as_slice()),
        ("Nearby", links.nearby.as_slice()),
        ("Services", links.services.as_slice()),
        ("Related models", links.related_models.as_slice()),
    ];
    for (title, section) in sections {
        if section.is_empty() {
            continue;
        }
        println!("\n{} ({}):", title, section.len());
        for link in section {
            println!("  {} -> {}", link.text, link.href);
        }
    }

    if !links.other_models.is_empty() {
        println!("\nOther models: {}", links.other_models.join(", "));
    }
}
