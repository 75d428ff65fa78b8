pub mod auth;
pub mod cli;
pub mod client;
pub mod commands;
pub mod logger;

use clap::Parser;
use cli::{Cli, Commands};
use logger::Logger;

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        Logger::error(format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let api_url = cli.api_url.as_deref();

    match cli.command {
        Commands::AddUser {
            username,
            password,
            credentials_file,
        } => commands::add_user(&username, password, &credentials_file),
        Commands::Login { username } => commands::login(api_url, username).await,
        Commands::Logout => commands::logout().await,
        Commands::List => commands::list(api_url).await,
        Commands::Show { nome } => commands::show(api_url, &nome).await,
        Commands::Add {
            nome,
            modelo,
            status,
        } => commands::add(api_url, &nome, &modelo, &status).await,
        Commands::SetStatus { nome, status } => commands::set_status(api_url, &nome, &status).await,
        Commands::Remove { nome } => commands::remove(api_url, &nome).await,
    }
}
