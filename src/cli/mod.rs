//! Command-line interface for qrforge.

mod commands;

use clap::{Parser, Subcommand};

pub use commands::{cmd_init, cmd_user_add, cmd_user_list};

/// qrforge - QR code generation service
#[derive(Parser)]
#[command(name = "qrforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user
    Add {
        email: String,
        password: String,
        /// USER, PREMIUMUSER or ADMINISTRATOR
        #[arg(long, default_value = "USER")]
        role: String,
    },

    /// List users
    #[command(alias = "ls")]
    List,
}
