//! services/planner/src/bin/lesson_pro.rs

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lesson_pro_core::{
    remaining_generations, AccountManager, LessonPlanner, PersistenceStore, PlanGenerator,
    SavedPlanManager,
};
use planner_lib::{
    adapters::{FileKeyValueStore, OpenAiPlanAdapter},
    commands::{build_form, generate_plan},
    config::Config,
    error::CliError,
    render::{render_plan, render_saved_plan_line},
    resource::load_resource,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lesson_pro", about = "Generate 5E lesson progression plans")]
struct Cli {
    /// Storage directory (overrides STORAGE_DIR)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a local account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Sign in as an existing local account
    Login { email: String },
    /// Sign out (accounts and counters are kept)
    Logout,
    /// Show the signed-in account and its remaining free plans
    Whoami,
    /// Print the default lesson form as JSON
    Template,
    /// Generate a lesson plan
    Generate {
        /// Lesson form JSON (defaults to the example form)
        #[arg(long)]
        form: Option<PathBuf>,
        /// Override a form field, e.g. --set topic=Osmosis
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
        /// Attach a resource file (images are sent inline)
        #[arg(long)]
        resource: Option<PathBuf>,
        /// Save the generated plan
        #[arg(long)]
        save: bool,
    },
    /// Saved plan management
    Plans {
        #[command(subcommand)]
        command: PlanCommands,
    },
}

#[derive(Subcommand)]
enum PlanCommands {
    /// List saved plans, most recent first
    List,
    /// Show one saved plan
    Show { id: i64 },
    /// Delete a saved plan
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!(storage = %config.storage_dir.display(), "Configuration loaded.");

    // --- 2. Open the Local Store ---
    let kv = Arc::new(FileKeyValueStore::new(config.storage_dir.clone()));
    let store = PersistenceStore::new(kv.clone());
    let accounts = AccountManager::new(store.clone());
    let plans = SavedPlanManager::new(store);

    // --- 3. Run the Command ---
    match cli.command {
        Commands::Register { name, email } => {
            let user = accounts.register(&name, &email)?;
            println!("Registered {} <{}>", user.name, user.email);
        }
        Commands::Login { email } => match accounts.start_session(&email)? {
            Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
            None => println!("No account found for {}", email),
        },
        Commands::Logout => {
            accounts.end_session()?;
            println!("Signed out");
        }
        Commands::Whoami => {
            let user = accounts.current_user();
            match (&user, remaining_generations(user.as_ref())) {
                (Some(user), Some(remaining)) => println!(
                    "{} <{}>: {} plans generated, {} free plans left",
                    user.name, user.email, user.generation_count, remaining
                ),
                _ => println!("Not signed in"),
            }
        }
        Commands::Template => {
            let form = build_form(None, &[], accounts.current_user().as_ref())?;
            println!("{}", serde_json::to_string_pretty(&form)?);
        }
        Commands::Generate {
            form,
            assignments,
            resource,
            save,
        } => {
            let form = build_form(
                form.as_deref(),
                &assignments,
                accounts.current_user().as_ref(),
            )?;
            let resource = resource.as_deref().map(load_resource).transpose()?;

            // --- 4. Initialize the LLM Adapter ---
            let adapter = Arc::new(OpenAiPlanAdapter::connect(
                config.require_api_key()?,
                &config.api_base,
                config.plan_model.clone(),
            ));
            let generator = PlanGenerator::new(adapter).with_timeout(config.request_timeout);
            let planner = LessonPlanner::with_generator(kv, generator);

            // Ctrl-C abandons the request without touching any record.
            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, abandoning generation");
                    on_interrupt.cancel();
                }
            });

            let report = generate_plan(&planner, &form, resource.as_ref(), save, &cancel).await?;
            print!("{}", render_plan(&report.rows));
            if let Some(saved) = report.saved {
                println!("Saved as plan {} ({})", saved.id, saved.title);
            }
        }
        Commands::Plans { command } => match command {
            PlanCommands::List => {
                let saved = plans.list()?;
                if saved.is_empty() {
                    println!("No saved plans yet.");
                }
                for plan in &saved {
                    println!("{}", render_saved_plan_line(plan));
                }
            }
            PlanCommands::Show { id } => match plans.load_by_id(id)? {
                Some(plan) => {
                    println!("{}", render_saved_plan_line(&plan));
                    println!("{}", serde_json::to_string_pretty(&plan.form_data)?);
                    print!("{}", render_plan(&plan.plan_data));
                }
                None => println!("No saved plan with id {}", id),
            },
            PlanCommands::Delete { id } => {
                plans.delete_by_id(id)?;
                println!("Deleted plan {}", id);
            }
        },
    }

    Ok(())
}
