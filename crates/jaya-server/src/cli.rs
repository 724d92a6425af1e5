use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Jaya - webhook to chat relay
#[derive(Parser, Debug)]
#[command(name = "jayad")]
#[command(version = jaya_core::VERSION)]
#[command(about = "Jaya webhook relay daemon", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Address to bind the HTTP server to
    #[arg(long, env = "JAYA_HOST", default_value = "0.0.0.0", global = true)]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short, env = "PORT", default_value_t = 8080, global = true)]
    pub port: u16,
}

#[derive(Subcommand, Debug, Default, PartialEq)]
pub enum Commands {
    /// Run server in foreground (default if no command given)
    #[default]
    Run,

    /// Print the X-Hub-Signature value for a payload file
    Sign {
        /// Payload file to sign
        #[arg(long, short)]
        file: PathBuf,

        /// Webhook secret
        #[arg(long, env = "JAYA_WEBHOOK_SECRET", hide_env_values = true)]
        secret: String,
    },

    /// List the event types the relay can decode
    EventTypes,
}
