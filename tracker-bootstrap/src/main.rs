use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tracker_application::commands::api_key_commands::IssueKeyRequest;
use tracker_bootstrap::{init_tracing, issue_key, run_standalone, LogOptions, StartupOptions};

#[derive(Parser, Debug)]
#[command(name = "anomaly-tracker-server")]
#[command(about = "Anomaly Tracker Server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides bind_addr
    #[arg(long)]
    listen_addr: Option<String>,

    /// Return raw error text to clients
    #[arg(long)]
    debug: bool,

    /// Also write daily-rolling log files into this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an API key and print its token
    IssueKey {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        group_id: i64,
        #[arg(long)]
        created_by: Option<i64>,
        #[arg(long)]
        key_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(&LogOptions {
        dir: args.log_dir,
        json: args.log_json,
    });

    let options = StartupOptions {
        config_path: args.config,
        listen_addr: args.listen_addr,
        debug: args.debug,
    };

    match args.command {
        Some(Command::IssueKey {
            user_id,
            group_id,
            created_by,
            key_type,
        }) => {
            let request = IssueKeyRequest {
                key_type,
                user_id,
                group_id,
                created_by,
            };
            let key = issue_key(&options, request).await?;
            println!("{}", key.token);
            Ok(())
        }
        None => run_standalone(options).await,
    }
}
