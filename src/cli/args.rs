//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Celebrity booking platform: API server, migrations and workers
#[derive(Parser, Debug)]
#[command(name = "celebrity-booking")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage background jobs
    Jobs(JobsArgs),

    /// Create an admin account
    CreateAdmin(CreateAdminArgs),
}

/// Arguments for the serve command
///
/// Falls back to `SERVER_HOST` / `SERVER_PORT` from the configuration.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the jobs command
#[derive(Parser, Debug)]
pub struct JobsArgs {
    #[command(subcommand)]
    pub action: JobsAction,
}

/// Job management actions
#[derive(Subcommand, Debug)]
pub enum JobsAction {
    /// Start the email worker
    Work,
    /// List queued jobs by status
    List,
    /// Clear failed jobs
    Clear,
}

/// Arguments for the create-admin command
#[derive(Parser, Debug)]
pub struct CreateAdminArgs {
    /// Admin email address
    #[arg(short, long, env = "ADMIN_EMAIL")]
    pub email: String,

    /// Admin password (at least 8 characters)
    #[arg(short, long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_admin() {
        let cli = Cli::parse_from([
            "celebrity-booking",
            "create-admin",
            "--email",
            "ops@example.com",
            "--password",
            "hunter2hunter2",
        ]);
        match cli.command {
            Commands::CreateAdmin(args) => assert_eq!(args.email, "ops@example.com"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_serve_flags_are_optional() {
        let cli = Cli::parse_from(["celebrity-booking", "-v", "serve", "--port", "8080"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
