use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "podup")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIME"), ")"))]
#[command(about = "Podman auto-update reconciler with chat webhook reporting", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile auto-updates and deliver the report to the chat webhook
    Run {
        /// KEY=VALUE credentials file loaded into the environment first
        #[arg(short, long)]
        env_file: Option<String>,

        /// Render the failed / still-pending sections even when empty
        #[arg(short, long)]
        all_sections: bool,

        /// Print the report to stdout instead of posting it
        #[arg(short, long)]
        no_notify: bool,

        /// Secrets-store id holding the webhook URL (overrides PODUP_WEBHOOK_SECRET_ID)
        #[arg(short, long)]
        secret_id: Option<String>,
    },

    /// Show what an update run would do, without changing anything
    Status {
        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },
}
