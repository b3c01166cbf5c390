//! `preflight` - Drone operations checklist generator
//!
//! This binary filters the checklist procedure library by the selected
//! facets and writes the compact checklist and procedure manual PDFs into a
//! timestamped output folder, archiving any previous output first.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;

use preflight::cli::{Cli, Command, ConfigCommand, GenerateCommand, OptionsCommand};
use preflight::{archive, checklist, interactive};
use preflight::{init_logging, Config, FacetCatalog, Generator, Selection};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Generate(cmd) => handle_generate(&config, &cmd),
        Command::Interactive => handle_interactive(&config),
        Command::Options(cmd) => handle_options(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_generate(config: &Config, cmd: &GenerateCommand) -> anyhow::Result<()> {
    let catalog = FacetCatalog::load(config.constants_file())?;
    let selection = Selection::new(
        cmd.operation
            .clone()
            .unwrap_or_else(|| config.defaults.operation.clone()),
        cmd.drone
            .clone()
            .unwrap_or_else(|| config.defaults.platform.clone()),
        cmd.count
            .clone()
            .unwrap_or_else(|| config.defaults.count.clone()),
    );
    catalog.validate(&selection)?;
    run_generation(config, catalog, selection, cmd.data_dir.clone())
}

fn handle_interactive(config: &Config) -> anyhow::Result<()> {
    let catalog = FacetCatalog::load(config.constants_file())?;
    let selection = interactive::prompt_selection(&catalog)?;
    catalog.validate(&selection)?;
    run_generation(config, catalog, selection, None)
}

fn run_generation(
    config: &Config,
    catalog: FacetCatalog,
    selection: Selection,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
    let checklists = match checklist::load_dir(&data_dir) {
        Ok(checklists) => checklists,
        Err(err) => {
            if err.is_input_error() {
                eprintln!("Error: {err}");
                eprintln!(
                    "Please ensure {} holds the checklist JSON files.",
                    data_dir.display()
                );
            }
            return Err(err.into());
        }
    };

    println!("Generating checklists with:");
    println!(
        "  Operation Type: {}",
        catalog.operation_label(&selection.operation)
    );
    println!(
        "  Drone Platform: {}",
        catalog.platform_label(&selection.platform)
    );
    println!("  Number of Drones: {}", catalog.count_label(&selection.count));
    println!("  Checklists: {} documents loaded", checklists.len());
    println!();

    let timestamp = archive::run_timestamp();
    let archived =
        archive::archive_existing(&config.output_dir(), &config.archive_dir(), &timestamp)?;
    if !archived.is_empty() {
        println!(
            "Archived {} previous artifact(s) to {}/",
            archived.len(),
            config.archive_dir().display()
        );
        println!();
    }

    let folder = archive::create_output_folder(&config.output_dir(), &selection, &timestamp)?;
    let generator = Generator::new(checklists, selection, catalog);
    let (summary, manual) = generator.generate(&folder, &config.output)?;

    println!("All documents generated successfully!");
    println!("  Output folder: {}", folder.display());
    println!("    - {}", summary.display());
    println!("    - {}", manual.display());
    Ok(())
}

fn handle_options(config: &Config, cmd: &OptionsCommand) -> anyhow::Result<()> {
    let catalog = FacetCatalog::load(config.constants_file())?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!();
    println!("Available Options:");
    println!();
    println!("Operation Types:");
    for option in &catalog.operation_types {
        println!("  {:<12} - {}", option.code, option.label);
    }
    println!();
    println!("Drone Platforms:");
    for option in &catalog.drone_platforms {
        println!("  {:<12} - {}", option.code, option.label);
    }
    println!();
    println!("Number of Drones:");
    for option in &catalog.drone_counts {
        println!("  {:<12} - {}", option.code, option.label);
    }
    println!();
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Paths]");
                println!("  Data directory:   {}", config.data_dir().display());
                println!("  Constants file:   {}", config.constants_file().display());
                println!("  Output directory: {}", config.output_dir().display());
                println!("  Archive:          {}", config.archive_dir().display());
                println!();
                println!("[Output]");
                println!("  Summary filename: {}", config.output.summary_filename);
                println!("  Manual filename:  {}", config.output.manual_filename);
                println!();
                println!("[Defaults]");
                println!("  Operation:        {}", config.defaults.operation);
                println!("  Platform:         {}", config.defaults.platform);
                println!("  Count:            {}", config.defaults.count);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
