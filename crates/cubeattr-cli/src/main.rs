//! cubeattr command line
//!
//! Owns an [`AttributeWorkflow`] for one cube file: it forwards gestures to
//! the workflow, accepts the cube the workflow proposes, and writes it out.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cubeattr_catalog::JsonCatalogAdapter;
use cubeattr_core::{Attribute, AttributeType, DataCube, Settings};
use cubeattr_engine::{
    AttributeWorkflow, Notice, Notifier, ProposedChange, ResponseOutcome, SuggestionModal,
};

/// cubeattr - inspect and extend data cube attributes
#[derive(Parser)]
#[command(name = "cubeattr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to settings file (default: cubeattr.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the attribute columns of a cube
    Columns {
        /// Cube file (.toml or .json)
        cube: PathBuf,
    },

    /// Discover attributes the source has but the cube does not
    Suggest {
        /// Cube file (.toml or .json)
        cube: PathBuf,

        /// Catalog document answering discovery requests
        #[arg(long)]
        catalog: PathBuf,

        /// Add these suggestions to the cube
        #[arg(long, conflicts_with = "add_all")]
        add: Vec<String>,

        /// Add every suggestion to the cube
        #[arg(long)]
        add_all: bool,

        /// Where to write the new cube (default: print it)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Change one attribute of a cube
    Edit {
        /// Cube file (.toml or .json)
        cube: PathBuf,

        /// Attribute to edit
        name: String,

        /// New attribute type (e.g. STRING, TIME, SET/STRING)
        #[arg(long = "type")]
        attribute_type: Option<AttributeType>,

        /// New special role
        #[arg(long, conflicts_with = "clear_special")]
        special: Option<String>,

        /// Remove the special role
        #[arg(long)]
        clear_special: bool,

        /// Where to write the new cube (default: print it)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Prints failure notices to stderr
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn failure(&self, notice: &Notice) {
        eprintln!("{} {}", notice.title.red().bold(), notice.message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let settings = if let Some(path) = &cli.config {
        Settings::from_file(path)?
    } else if Path::new("cubeattr.toml").exists() {
        Settings::from_file(Path::new("cubeattr.toml"))?
    } else {
        tracing::debug!("No settings file found, using defaults");
        Settings::default()
    };

    match cli.command {
        Commands::Columns { cube } => columns_command(&cube),
        Commands::Suggest { cube, catalog, add, add_all, output } => {
            suggest_command(&settings, &cube, &catalog, &add, add_all, output.as_deref()).await
        }
        Commands::Edit { cube, name, attribute_type, special, clear_special, output } => {
            let change = AttributeChange { attribute_type, special, clear_special };
            edit_command(&settings, &cube, &name, change, output.as_deref()).await
        }
    }
}

fn load_cube(path: &Path) -> Result<DataCube> {
    DataCube::from_file(path).with_context(|| format!("Failed to load cube {}", path.display()))
}

/// Columns command - print one line per column header
fn columns_command(cube_path: &Path) -> Result<()> {
    let cube = load_cube(cube_path)?;
    let columns = cubeattr_engine::derive_columns(&cube);

    println!(
        "{} {} ({}/{})",
        "Cube".cyan(),
        cube.title.as_deref().unwrap_or(&cube.name).bold(),
        cube.cluster_name,
        cube.source
    );

    if columns.is_empty() {
        println!("  {}", "No attributes".yellow());
        return Ok(());
    }

    for column in &columns {
        let header = column.header();
        let name = if column.is_primary {
            header.name.green().bold()
        } else {
            header.name.normal()
        };
        println!("  {:<24} {:<24} {}", name, header.type_label, header.icon.dimmed());
    }

    Ok(())
}

/// Suggest command - run discovery and optionally add suggestions
async fn suggest_command(
    settings: &Settings,
    cube_path: &Path,
    catalog_path: &Path,
    add: &[String],
    add_all: bool,
    output: Option<&Path>,
) -> Result<()> {
    let cube = load_cube(cube_path)?;
    let adapter = JsonCatalogAdapter::from_path(catalog_path).await?;

    let (tx, mut changes) = mpsc::unbounded_channel();
    let mut workflow = AttributeWorkflow::new(cube, Arc::new(adapter), tx)
        .with_settings(settings)
        .with_notifier(Arc::new(ConsoleNotifier));

    workflow.open_suggestions();
    let outcome = workflow
        .process_next_completion()
        .await
        .context("Discovery ended without a result")?;

    if let ResponseOutcome::Failed(notice) = outcome {
        anyhow::bail!("{}: {}", notice.title, notice.message);
    }

    let modal = workflow
        .suggestion_modal()
        .context("Suggestion dialog closed unexpectedly")?;
    print_suggestions(&modal);

    // Nothing asked for: dismiss the dialog like the cancel button does
    if add.is_empty() && !add_all {
        workflow.close_suggestions();
        return Ok(());
    }

    let suggestions = match workflow.suggestion_dialog().suggestions() {
        Some(set) => set,
        None => return Ok(()),
    };

    let chosen = if add_all {
        suggestions.attributes().to_vec()
    } else {
        suggestions.select(add)?
    };

    println!("{}", SuggestionModal::ok_label(chosen.len()).cyan());
    workflow.add_selected(chosen)?;
    accept_change(&mut workflow, &mut changes, output).await
}

fn print_suggestions(modal: &SuggestionModal) {
    println!("{}", modal.title.bold());

    if modal.is_empty() {
        println!("  {}", "No new attributes found".yellow());
        return;
    }

    for option in &modal.options {
        println!("  {} {}", "+".green(), option.label);
    }
}

/// Requested changes to an attribute
struct AttributeChange {
    attribute_type: Option<AttributeType>,
    special: Option<String>,
    clear_special: bool,
}

impl AttributeChange {
    fn apply(self, attribute: &Attribute) -> Attribute {
        let mut updated = attribute.clone();
        if let Some(attribute_type) = self.attribute_type {
            updated = updated.with_type(attribute_type);
        }
        if self.clear_special {
            updated = updated.without_special();
        } else if let Some(special) = self.special {
            updated = updated.with_special(special);
        }
        updated
    }
}

/// Edit command - edit a single attribute
async fn edit_command(
    settings: &Settings,
    cube_path: &Path,
    name: &str,
    change: AttributeChange,
    output: Option<&Path>,
) -> Result<()> {
    let cube = load_cube(cube_path)?;
    let index = cube
        .attributes
        .iter()
        .position(|a| a.name == name)
        .with_context(|| format!("Cube '{}' has no attribute '{}'", cube.name, name))?;

    // Editing never reaches the backend; the catalog is empty.
    let adapter = JsonCatalogAdapter::from_json("{}")?;
    let (tx, mut changes) = mpsc::unbounded_channel();
    let mut workflow = AttributeWorkflow::new(cube, Arc::new(adapter), tx).with_settings(settings);

    workflow.activate_header(index);
    let session = workflow
        .edit_session()
        .context("Edit session did not start")?;
    let updated = change.apply(session.attribute());

    workflow.save_edit(updated)?;
    accept_change(&mut workflow, &mut changes, output).await
}

/// Take the proposed cube, hand it back to the workflow, and write it out
async fn accept_change(
    workflow: &mut AttributeWorkflow,
    changes: &mut UnboundedReceiver<ProposedChange>,
    output: Option<&Path>,
) -> Result<()> {
    let change = changes.recv().await.context("No change was proposed")?;
    tracing::debug!(reason = ?change.reason, "Accepted proposed change");
    workflow.set_cube(change.cube);

    match output {
        Some(path) => {
            workflow.cube().save_to_file(path)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
        None => print!("{}", workflow.cube().to_toml()?),
    }

    Ok(())
}
