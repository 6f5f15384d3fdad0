//! folio - Academic portfolio site generator
//!
//! A CLI tool that turns a folio.toml configuration and a directory of JSON
//! content files into a single-page portfolio with sidebar navigation.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(dead_code)]

mod cli;
mod content_model;
mod inline_links;
mod navigation;
mod scaffold;
mod session;
mod site_config;
mod view_state;

// Three-stage build pipeline modules
mod page_model;
mod pipeline;

// HTML exporter
mod html_exporter;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

/// Main entry point for the folio CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force, name } => {
            handle_init_command(path, force, &name)?;
        }

        Commands::Build {
            input,
            output,
            viewport_width,
            verbose,
        } => {
            init_logging(verbose);
            handle_build_command(&input, &output, viewport_width, verbose)?;
        }

        Commands::Validate { input, verbose } => {
            init_logging(verbose);
            handle_validate_command(&input, verbose)?;
        }

        Commands::Simulate {
            script,
            input,
            viewport_width,
            verbose,
        } => {
            init_logging(verbose);
            handle_simulate_command(&script, &input, viewport_width)?;
        }

        Commands::ListSections { input } => {
            handle_list_sections_command(&input)?;
        }
    }

    Ok(())
}

/// Initialize logging if verbose
fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

/// Handle the init command
fn handle_init_command(path: Option<PathBuf>, force: bool, name: &str) -> Result<()> {
    let target_path = path.unwrap_or_else(|| PathBuf::from("."));

    println!("Initializing portfolio for {}", name);
    println!("Target path: {}", target_path.display());

    let files_created = scaffold::create_site(&target_path, name, force)
        .with_context(|| format!("Failed to initialize {}", target_path.display()))?;

    println!("\n✓ Successfully created {} files", files_created);
    println!("\nNext steps:");
    println!("  1. Edit folio.toml to configure your site");
    println!("  2. Fill in the JSON files in the data/ directory");
    println!("  3. Run 'folio build' to generate index.html");

    Ok(())
}

/// Handle the build command
fn handle_build_command(
    input: &Path,
    output: &Path,
    viewport_width: Option<u32>,
    verbose: bool,
) -> Result<()> {
    println!("Building portfolio...");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());

    // Stage 1: Load configuration and content
    println!("\n[Stage 1/3] Loading content...");
    let mut source = pipeline::load_site(input)
        .with_context(|| format!("Failed to load site from {}", input.display()))?;
    if let Some(width) = viewport_width {
        source.config.initial_viewport_width_px = width;
    }

    println!(
        "✓ Loaded {} sections, {} courses, {} publications",
        source.config.sections.len(),
        source.content.teaching.len(),
        source.content.publication_count()
    );

    // Stage 2: Transform to page model
    println!("\n[Stage 2/3] Transforming to page model...");
    let page = pipeline::transform(source)
        .with_context(|| "Failed to transform content to page model")?;

    println!("✓ Transformed {} sections", page.sections.len());
    print_warnings(&page.warnings);
    if verbose {
        println!(
            "  - initial section: {}",
            page.active_section_id().unwrap_or("-")
        );
        println!("  - scroll snapping: {}", page.snap_mode);
    }

    // Stage 3: Export to HTML
    println!("\n[Stage 3/3] Exporting to HTML...");
    html_exporter::to_html(&page, output)
        .with_context(|| format!("Failed to export HTML to {}", output.display()))?;
    println!("✓ Successfully wrote: {}", output.display());

    println!("\n✓ Build completed successfully!");

    Ok(())
}

/// Handle the validate command
fn handle_validate_command(input: &Path, verbose: bool) -> Result<()> {
    println!("Validating site...");
    println!("Input: {}", input.display());

    let source = pipeline::load_site(input)
        .with_context(|| format!("Failed to load site from {}", input.display()))?;

    if verbose {
        let content = &source.content;
        println!("  - {} education entries", content.education.len());
        println!("  - {} courses", content.teaching.len());
        println!("  - {} TA courses", content.ta.len());
        println!("  - {} service venues", content.service.len());
        println!("  - {} publications", content.publication_count());
    }

    let page = pipeline::transform(source)
        .with_context(|| "Failed to transform content to page model")?;

    print_warnings(&page.warnings);
    if page.warnings.is_empty() {
        println!("✓ No problems found");
    }

    Ok(())
}

/// Handle the simulate command
fn handle_simulate_command(script: &Path, input: &Path, viewport_width: Option<u32>) -> Result<()> {
    let config_path = input.join(site_config::CONFIG_FILE_NAME);
    let config = site_config::SiteConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let text = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let events = session::parse_script(&text)
        .with_context(|| format!("Invalid script {}", script.display()))?;

    let mut page_session = session::PageSession::new(&config)?;
    let width = viewport_width.unwrap_or(config.initial_viewport_width_px);
    page_session.start(width);
    println!("start {}px: {}", width, page_session.snapshot());

    for event in &events {
        page_session
            .dispatch(event)
            .with_context(|| format!("Event {:?} failed", event))?;
        println!("{:?}: {}", event, page_session.snapshot());
    }

    Ok(())
}

/// Handle the list-sections command
fn handle_list_sections_command(input: &Path) -> Result<()> {
    let config_path = input.join(site_config::CONFIG_FILE_NAME);
    let config = site_config::SiteConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    println!("Navigation sections:\n");
    for section in config.navigation_controller()?.sections() {
        println!("  {}. {} (#{})", section.order + 1, section.label, section.id);
    }

    Ok(())
}

/// Print authoring warnings collected during transformation
fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        println!("Warning: {}", warning);
    }
}
