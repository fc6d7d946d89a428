// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! docsort: Local LLM PDF Classifier & Organizer
//!
//! Classifies PDF documents against a category taxonomy using a local
//! Ollama model and files them into a matching directory tree.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use docsort::classifier::{classify_documents, ClassificationResult, Label, OllamaClassifier};
use docsort::config::AppConfig;
use docsort::history::History;
use docsort::loader::load_pdfs_from_dir;
use docsort::ollama::OllamaClient;
use docsort::organizer::collision::resolve_destination;
use docsort::organizer::{BackupPolicy, CategoryPath, Organizer};
use docsort::report::{self, BatchReport};
use docsort::{DocsortError, Result};

/// docsort CLI - Local LLM PDF Classifier & Organizer
#[derive(Parser, Debug)]
#[command(name = "docsort")]
#[command(version = "0.2.0")]
#[command(about = "Classify PDF documents with a local LLM and file them into a category tree", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json", "jsonl"])]
    format: String,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify PDFs and move them into the category tree
    Organize {
        /// Folder containing the PDFs to organize (overrides config)
        #[arg(short, long, env = "DOCUMENTS_PATH")]
        input: Option<PathBuf>,

        /// Root folder of the organized tree (overrides config)
        #[arg(short, long, env = "OUTPUT_PATH")]
        output: Option<PathBuf>,

        /// Ollama model to classify with (overrides config)
        #[arg(short, long)]
        model: Option<String>,

        /// Show planned placements without touching any file
        #[arg(long)]
        dry_run: bool,

        /// Disable pre-move backups
        #[arg(long, conflicts_with = "require_backup")]
        no_backup: bool,

        /// Treat a failed backup as a failed placement
        #[arg(long)]
        require_backup: bool,

        /// Skip Ollama health check on startup
        #[arg(long)]
        skip_health_check: bool,
    },

    /// Classify PDFs and print the labels without moving anything
    Classify {
        /// Folder containing the PDFs to classify (overrides config)
        #[arg(short, long, env = "DOCUMENTS_PATH")]
        input: Option<PathBuf>,

        /// Ollama model to classify with (overrides config)
        #[arg(short, long)]
        model: Option<String>,

        /// Skip Ollama health check on startup
        #[arg(long)]
        skip_health_check: bool,
    },

    /// Show AI engine status and configured paths
    Status {
        /// Check specific model availability
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Placement journal operations
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommands {
    /// List recent placements
    List {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// Clear the placement journal
    Clear {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config.json")]
        output: PathBuf,
    },

    /// Validate configuration file
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if !cli.quiet {
        info!("docsort v0.2.0 - Local LLM PDF Classifier");
    }

    // Load configuration
    let mut config = AppConfig::load(&cli.config)?;

    match cli.command {
        Some(Commands::Organize {
            input,
            output,
            model,
            dry_run,
            no_backup,
            require_backup,
            skip_health_check,
        }) => {
            apply_overrides(&mut config, input, output, model);
            if no_backup {
                config.organizer.backup = BackupPolicy::Off;
            }
            if require_backup {
                config.organizer.backup = BackupPolicy::Required;
            }
            run_organize(config, dry_run, skip_health_check, &cli.format).await
        }
        Some(Commands::Classify {
            input,
            model,
            skip_health_check,
        }) => {
            apply_overrides(&mut config, input, None, model);
            run_classify(config, skip_health_check, &cli.format).await
        }
        Some(Commands::Status { model }) => run_status(config, model).await,
        Some(Commands::History { action }) => run_history_command(config, action).await,
        Some(Commands::Config { action }) => {
            run_config_command(config, action, &cli.config).await
        }
        None => {
            // Default: organize with configured paths
            run_organize(config, false, false, &cli.format).await
        }
    }
}

/// Fold CLI overrides into the loaded configuration
fn apply_overrides(
    config: &mut AppConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    model: Option<String>,
) {
    if let Some(input) = input {
        config.input_dir = input.to_string_lossy().into_owned();
    }
    if let Some(output) = output {
        config.output_dir = output.to_string_lossy().into_owned();
    }
    if let Some(model) = model {
        config.ai_engine.model = model;
    }
}

/// Verify the engine is reachable and warn if the model is missing
async fn check_engine(client: &OllamaClient, model: &str) -> Result<()> {
    info!("Checking Ollama availability...");
    match client.health_check().await {
        Ok(()) => info!("Ollama is running"),
        Err(e) => {
            return Err(DocsortError::EngineUnavailable(format!(
                "Failed to connect to Ollama: {}. Is the server running?",
                e
            )))
        }
    }

    if client.model_available(model).await? {
        info!("Model '{}' available", model);
    } else {
        let installed = client.list_models().await.unwrap_or_default();
        warn!("Model '{}' not found. Available: {:?}", model, installed);
        warn!("Try: ollama pull {}", model);
    }

    Ok(())
}

/// Run the full classify-and-move pass
async fn run_organize(
    config: AppConfig,
    dry_run: bool,
    skip_health_check: bool,
    format: &str,
) -> Result<()> {
    config.validate()?;

    let input_dir = PathBuf::from(&config.input_dir);
    let output_dir = PathBuf::from(&config.output_dir);
    info!("Using input path: {:?}", input_dir);
    info!("Using output path: {:?}", output_dir);

    if dry_run {
        warn!("DRY RUN MODE - files will not be moved");
    }

    let client = OllamaClient::new(&config.ai_engine.url, config.ai_engine.timeout_secs);
    if !skip_health_check {
        check_engine(&client, &config.ai_engine.model).await?;
    } else {
        warn!("Skipping Ollama health check");
    }

    let documents = load_pdfs_from_dir(&input_dir, &config.processing)?;

    let classifier = OllamaClassifier::new(&config);
    let results = classify_documents(&classifier, &documents, config.processing.max_chars).await;

    if dry_run {
        return render_dry_run(&results, &output_dir, &config, format);
    }

    let journal = History::new(PathBuf::from(&config.organizer.journal_path));
    let organizer = Organizer::new(output_dir, &config.organizer, Some(journal))?;
    let records = organizer.organize(&input_dir, &results);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&records)?),
        "jsonl" => {
            for record in &records {
                println!("{}", serde_json::to_string(record)?);
            }
        }
        _ => {
            report::print_records(&records);
            println!("{}", BatchReport::from_records(&records));
        }
    }

    Ok(())
}

/// Show where each document would go, without moving anything
fn render_dry_run(
    results: &[ClassificationResult],
    output_dir: &Path,
    config: &AppConfig,
    format: &str,
) -> Result<()> {
    let mut planned = Vec::new();

    for result in results {
        match &result.label {
            Label::Category(raw) => {
                let category =
                    CategoryPath::resolve(raw, &config.organizer.fallback_category);
                let dir = output_dir.join(category.as_rel_path());
                let dest = resolve_destination(&dir, &result.file_name);
                planned.push(serde_json::json!({
                    "file_name": result.file_name,
                    "category_path": &category,
                    "planned_path": &dest,
                }));
                if format == "text" {
                    println!("{} -> {}", result.file_name, category);
                    println!("  Would move to: {}", dest.display());
                    println!("---");
                }
            }
            Label::Failed(reason) => {
                planned.push(serde_json::json!({
                    "file_name": result.file_name,
                    "error": reason,
                }));
                if format == "text" {
                    println!("{} -> classification failed", result.file_name);
                    println!("  Reason: {}", reason);
                    println!("---");
                }
            }
        }
    }

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&planned)?),
        "jsonl" => {
            for item in &planned {
                println!("{}", serde_json::to_string(item)?);
            }
        }
        _ => println!("Planned {} placement(s), nothing moved", planned.len()),
    }

    Ok(())
}

/// Classify only: print labels, move nothing
async fn run_classify(config: AppConfig, skip_health_check: bool, format: &str) -> Result<()> {
    config.validate()?;

    let input_dir = PathBuf::from(&config.input_dir);
    info!("Using input path: {:?}", input_dir);

    let client = OllamaClient::new(&config.ai_engine.url, config.ai_engine.timeout_secs);
    if !skip_health_check {
        check_engine(&client, &config.ai_engine.model).await?;
    } else {
        warn!("Skipping Ollama health check");
    }

    let documents = load_pdfs_from_dir(&input_dir, &config.processing)?;

    let classifier = OllamaClassifier::new(&config);
    let results = classify_documents(&classifier, &documents, config.processing.max_chars).await;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&results)?),
        "jsonl" => {
            for result in &results {
                println!("{}", serde_json::to_string(result)?);
            }
        }
        _ => {
            for result in &results {
                match &result.label {
                    Label::Category(label) => println!("{} -> {}", result.file_name, label),
                    Label::Failed(reason) => {
                        println!("{} -> classification failed: {}", result.file_name, reason)
                    }
                }
            }
            println!("\nClassified {} document(s)", results.len());
        }
    }

    Ok(())
}

/// Run status check
async fn run_status(config: AppConfig, model: Option<String>) -> Result<()> {
    let client = OllamaClient::new(&config.ai_engine.url, config.ai_engine.timeout_secs);

    println!("docsort v0.2.0 Status");
    println!("=====================");

    // Check Ollama
    match client.health_check().await {
        Ok(()) => println!("Ollama: Running"),
        Err(e) => println!("Ollama: Error - {}", e),
    }

    // List models
    let wanted = model.unwrap_or_else(|| config.ai_engine.model.clone());
    match client.list_models().await {
        Ok(models) => {
            println!("\nAvailable models:");
            for m in &models {
                let marker = if OllamaClient::model_matches(m, &wanted) { "→" } else { " " };
                println!("  {} {}", marker, m);
            }
        }
        Err(e) => println!("  Error listing models: {}", e),
    }

    println!("\nConfiguration:");
    println!("  Input:    {}", config.input_dir);
    println!("  Output:   {}", config.output_dir);
    println!("  Model:    {}", config.ai_engine.model);
    println!("  Backups:  {:?}", config.organizer.backup);
    println!("  Journal:  {}", config.organizer.journal_path);
    println!("  Taxonomy: {} categories", config.taxonomy.len());

    Ok(())
}

/// Run journal commands
async fn run_history_command(config: AppConfig, action: HistoryCommands) -> Result<()> {
    let history = History::new(PathBuf::from(&config.organizer.journal_path));

    match action {
        HistoryCommands::List { count } => {
            let entries = history.get_recent(count)?;
            println!("Recent placements ({} entries):", entries.len());
            for entry in entries {
                println!(
                    "  {} {} -> {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.original_path.display(),
                    entry.final_path.display()
                );
                println!("     Label: {}", entry.label);
            }
        }
        HistoryCommands::Clear { force } => {
            if !force {
                eprintln!("Use --force to confirm clearing the journal");
                return Ok(());
            }
            history.clear()?;
            println!("Journal cleared");
        }
    }

    Ok(())
}

/// Run config commands
async fn run_config_command(
    config: AppConfig,
    action: ConfigCommands,
    config_path: &Path,
) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        ConfigCommands::Generate { output } => {
            let default_config = AppConfig::default();
            default_config.save(&output)?;
            println!("Generated config at {:?}", output);
        }
        ConfigCommands::Validate => {
            config.validate()?;
            println!("Configuration at {:?} is valid", config_path);
            println!("  Input:  {}", config.input_dir);
            println!("  Output: {}", config.output_dir);
            println!("  Model:  {}", config.ai_engine.model);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["docsort"]).unwrap();
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
        assert_eq!(cli.format, "text");
    }

    #[test]
    fn test_cli_organize_command() {
        let cli = Cli::try_parse_from([
            "docsort",
            "organize",
            "--dry-run",
            "--input",
            "/tmp/inbox",
            "--no-backup",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Organize {
                dry_run,
                input,
                no_backup,
                require_backup,
                ..
            }) => {
                assert!(dry_run);
                assert!(no_backup);
                assert!(!require_backup);
                assert_eq!(input, Some(PathBuf::from("/tmp/inbox")));
            }
            _ => panic!("Expected Organize command"),
        }
    }

    #[test]
    fn test_cli_rejects_conflicting_backup_flags() {
        let result =
            Cli::try_parse_from(["docsort", "organize", "--no-backup", "--require-backup"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_classify_command() {
        let cli = Cli::try_parse_from([
            "docsort",
            "classify",
            "--model",
            "llama3",
            "--skip-health-check",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Classify {
                model,
                skip_health_check,
                ..
            }) => {
                assert_eq!(model, Some("llama3".to_string()));
                assert!(skip_health_check);
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_cli_history_list_count() {
        let cli =
            Cli::try_parse_from(["docsort", "history", "list", "-n", "25"]).unwrap();

        match cli.command {
            Some(Commands::History {
                action: HistoryCommands::List { count },
            }) => assert_eq!(count, 25),
            _ => panic!("Expected History List command"),
        }
    }

    #[test]
    fn test_apply_overrides_updates_config() {
        let mut config = AppConfig::default();
        apply_overrides(
            &mut config,
            Some(PathBuf::from("/srv/in")),
            Some(PathBuf::from("/srv/out")),
            Some("llama3".to_string()),
        );
        assert_eq!(config.input_dir, "/srv/in");
        assert_eq!(config.output_dir, "/srv/out");
        assert_eq!(config.ai_engine.model, "llama3");

        // None leaves existing values alone
        apply_overrides(&mut config, None, None, None);
        assert_eq!(config.input_dir, "/srv/in");
    }
}
