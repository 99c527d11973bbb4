//! lh - LearnHub CLI
//!
//! Entry point for generating, saving, and rendering learning plans.

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};

use learnhub::cli::{Cli, Command, OutputFormat};
use learnhub::config::Config;
use learnhub::domain::Plan;
use learnhub::llm::create_client;
use learnhub::planner::Planner;
use learnhub::prompts::TaskBuilder;
use learnhub::render::render_markdown;
use planstore::PlanStore;

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    // Logs go to stderr; stdout is reserved for rendered output
    let level = match cli_log_level.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

fn open_store(config: &Config) -> Result<PlanStore> {
    let data_dir = config.storage.resolve_data_dir();
    PlanStore::open(&data_dir).context(format!("Failed to open plan store at {}", data_dir.display()))
}

fn print_plan(plan: &Plan, model_label: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Markdown => println!("{}", render_markdown(plan, model_label)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(plan).context("Failed to serialize plan")?
        ),
    }
    Ok(())
}

async fn cmd_create(
    config: &Config,
    goal: &str,
    model: Option<String>,
    api_key: Option<String>,
    save: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut llm_config = config.llm.clone();
    if let Some(model) = model {
        llm_config.model = model;
    }
    let api_key = llm_config.resolve_api_key(api_key.as_deref())?;

    let client = create_client(&llm_config, api_key).context("Failed to create responder client")?;
    // Project-local prompt overrides, embedded template otherwise
    let tasks = TaskBuilder::with_override(".learnhub/prompts");
    let planner = Planner::new(client, tasks, llm_config.max_tokens);

    let plan = planner.create_plan(goal).await.context("Plan generation failed")?;

    if save {
        let store = open_store(config)?;
        store.save(&plan.id, &plan).context("Failed to save plan")?;
        eprintln!("Saved plan {}", plan.id.cyan());
    }

    print_plan(&plan, &llm_config.model, format)
}

fn cmd_show(config: &Config, id: &str, format: OutputFormat) -> Result<()> {
    let store = open_store(config)?;
    let plan: Plan = store.load(id).context(format!("Failed to load plan {id}"))?;
    print_plan(&plan, &config.llm.model, format)
}

fn cmd_list(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    for id in store.list().context("Failed to list plans")? {
        match store.load::<Plan>(&id) {
            Ok(plan) => println!("{}  {}", id.cyan(), plan.goal),
            Err(e) => println!("{}  {}", id.cyan(), format!("(unreadable: {e})").red()),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref())?;

    let config = Config::load(cli.config.as_ref())?;

    match cli.command {
        Command::Create {
            goal,
            model,
            api_key,
            save,
            format,
        } => cmd_create(&config, &goal, model, api_key, save, format).await,
        Command::Show { id, format } => cmd_show(&config, &id, format),
        Command::List => cmd_list(&config),
    }
}
