use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand};
use tableau_tui::{
    config::Config,
    engine::load_catalog,
    error::{Error, Result},
    headless,
    logic::OperatorNotations,
    state::{codec::KEY_OPERATOR_NOTATIONS, JsonFileStore, Location, Preferences},
    tui::{
        self,
        app::{App, AppContext},
    },
};

#[derive(Parser)]
#[command(name = "tableau-tui")]
#[command(about = "Terminal workspace for tableau proofs and countermodels")]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Solving engine command, overrides the config
    #[arg(long, global = true)]
    engine: Option<String>,
    /// Problem catalog JSON, overrides the config
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Query string of a shareable URL, e.g. "?logic=KModalLogic&premises=&conclusion=p"
    #[arg(long, global = true)]
    query: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive workspace (default)
    Tui,
    /// Prove the problem given by --query and print the outcome
    Solve {
        /// Prove this catalog problem instead of the one in --query
        #[arg(long)]
        problem: Option<String>,
    },
    /// List the problems of the catalog
    Catalog,
    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing() {
    let Some(dir) = dirs::cache_dir().map(|dir| dir.join("tableau-tui")) else {
        return;
    };
    let log_file = fs::create_dir_all(&dir).and_then(|()| fs::File::create(dir.join("tableau-tui.log")));
    let Ok(log_file) = log_file else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "tableau_tui=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(true)
        .with_target(false)
        .pretty()
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(engine) = &cli.engine {
        config.engine.command = Some(engine.clone());
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog = Some(catalog.clone());
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let location = Location::parse(cli.query.as_deref().unwrap_or_default());

    match cli.command.as_ref().unwrap_or(&Commands::Tui) {
        Commands::Tui => {
            let config = load_config(&cli)?;
            let context = AppContext {
                engine: config.build_engine(),
                preferences: Preferences::new(Box::new(JsonFileStore::open(
                    &JsonFileStore::default_path(),
                ))),
                location,
                universe: config.universe(),
                catalog: load_catalog(config.catalog.as_deref())?,
            };
            let location = tui::run(App::new(context)?).await?;
            if !location.is_empty() {
                println!("{location}");
            }
        }
        Commands::Solve { problem } => {
            let config = load_config(&cli)?;
            let preferences =
                Preferences::new(Box::new(JsonFileStore::open(&JsonFileStore::default_path())));
            let notations = OperatorNotations::resolve(
                location.get(KEY_OPERATOR_NOTATIONS),
                preferences.operator_notations().as_deref(),
            );
            let engine = config.build_engine();
            let report = match problem {
                Some(id) => headless::solve_catalog_problem(
                    engine.as_ref(),
                    &load_catalog(config.catalog.as_deref())?,
                    id,
                    &location,
                    notations,
                )?,
                None => headless::solve(engine.as_ref(), &location, notations)?,
            };
            println!("{report}");
        }
        Commands::Catalog => {
            let config = load_config(&cli)?;
            print!("{}", headless::catalog_listing(&load_catalog(config.catalog.as_deref())?));
        }
        Commands::InitConfig { force } => {
            let path = cli.config.clone().unwrap_or_else(Config::default_path);
            if path.exists() && !force {
                return Err(Error::Config(format!(
                    "{} already exists, pass --force to overwrite",
                    path.display()
                )));
            }
            Config::default().save_to(&path)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
