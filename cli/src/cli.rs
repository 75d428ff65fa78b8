use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "frota")]
#[command(about = "Client and admin tool for the Frota vehicle API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the API URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a user to the server's credentials file (run on the server host)
    AddUser {
        /// Username to create
        username: String,
        /// Password (prompted for if omitted)
        #[arg(long)]
        password: Option<String>,
        /// Credentials file to append to
        #[arg(long, default_value = "credentials.txt")]
        credentials_file: PathBuf,
    },
    /// Log in and save the access token
    Login {
        /// Username (prompted for if omitted)
        #[arg(long)]
        username: Option<String>,
    },
    /// Log out and clear the saved token
    Logout,
    /// List vehicle names
    List,
    /// Show one vehicle
    Show {
        /// Vehicle name
        nome: String,
    },
    /// Register a new vehicle
    Add {
        /// Vehicle name
        nome: String,
        /// Model description
        modelo: String,
        /// CONECTADO or DESCONECTADO
        status: String,
    },
    /// Change a vehicle's status
    SetStatus {
        /// Vehicle name
        nome: String,
        /// CONECTADO or DESCONECTADO
        status: String,
    },
    /// Delete every vehicle with this name
    Remove {
        /// Vehicle name
        nome: String,
    },
}
