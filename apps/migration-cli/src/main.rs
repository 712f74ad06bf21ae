use std::env;

use clap::{Parser, ValueEnum};
use migration::sea_orm::{ConnectOptions, Database};
use migration::{migrate, MigrationCommand};

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(value: Command) -> Self {
        match value {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Mysql,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Tyre workflow database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database type (ignored when --database-url is given)
    #[arg(short, long, value_enum, default_value = "mysql")]
    db: Db,

    /// Full connection URL; overrides the DB_* / SQLITE_PATH variables
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

fn must_var(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("Required environment variable '{name}' is not set"))
}

fn url_from_env(db: Db) -> Result<String, String> {
    match db {
        Db::Mysql => {
            let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("DB_PORT").unwrap_or_else(|_| "3306".to_string());
            let user = must_var("DB_USER")?;
            let pass = must_var("DB_PASS")?;
            let name = must_var("DB_NAME")?;
            Ok(format!("mysql://{user}:{pass}@{host}:{port}/{name}"))
        }
        Db::SqliteFile => {
            let path = env::var("SQLITE_PATH").unwrap_or_else(|_| "./data/tyre.db".to_string());
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let url = match args.database_url {
        Some(url) => url,
        None => match url_from_env(args.db) {
            Ok(url) => url,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(2);
            }
        },
    };

    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);
    let db = match Database::connect(opts).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    match migrate(&db, args.command.into()).await {
        Ok(report) => println!(
            "{:?} on {:?}: {} of {} migration(s) applied (was {}), latest {}",
            report.command,
            report.backend,
            report.applied_after,
            report.defined,
            report.applied_before,
            report.latest.as_deref().unwrap_or("none"),
        ),
        Err(e) => {
            eprintln!("Migration failed: {e}");
            std::process::exit(1);
        }
    }
}
