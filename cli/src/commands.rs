use crate::auth::Session;
use crate::client::ApiClient;
use crate::logger::Logger;
use anyhow::{Result, anyhow};
use comfy_table::Table;
use frota_server::models::vehicle::Vehicle;
use frota_server::store::credentials::CredentialStore;
use frota_server::utils::auth::hash_password;
use inquire::{Password, Text};
use std::path::Path;

/// Hashes a password and appends the user to a credentials file.
///
/// Works on the file directly, no server involved. Run it on the host the
/// server reads `CREDENTIALS_FILE` from.
pub fn add_user(username: &str, password: Option<String>, credentials_file: &Path) -> Result<()> {
    // Same normalisation as `login`, so the name typed here is the one that logs in.
    let username = username.trim();
    let password = match password {
        Some(p) => p,
        None => Password::new("Password:")
            .with_display_mode(inquire::PasswordDisplayMode::Masked)
            .prompt()?,
    };
    if password.is_empty() {
        return Err(anyhow!("Password cannot be empty"));
    }

    let hashed = hash_password(&password).map_err(|e| anyhow!("Hashing failed: {}", e))?;
    CredentialStore::new(credentials_file).append(username, &hashed)?;

    Logger::success(format!(
        "User {} added to {}",
        Logger::highlight(username),
        Logger::dim(credentials_file.display())
    ));
    Ok(())
}

/// Prompts for credentials, logs in and keeps the token for later commands.
pub async fn login(api_url: Option<&str>, username: Option<String>) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => Text::new("Username:").prompt()?,
    };
    let username = username.trim().to_string();
    let password = Password::new("Password:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let mut session = Session::load()?;
    let api_url = session.resolve_api_url(api_url);
    let client = ApiClient::new(api_url.clone(), None);

    Logger::info(format!("Authenticating with {}...", Logger::dim(client.base_url())));
    let token = client.login(&username, &password).await?;

    session.token = Some(token);
    session.username = Some(username.clone());
    session.api_url = Some(api_url);
    session.save()?;

    Logger::success(format!("Logged in as {}!", Logger::highlight(&username)));
    Ok(())
}

pub async fn logout() -> Result<()> {
    Session::clear()?;
    Logger::success("Logged out.");
    Ok(())
}

pub async fn list(api_url: Option<&str>) -> Result<()> {
    let names = client(api_url)?.list().await?;

    if names.is_empty() {
        Logger::warn("No vehicles registered.");
        return Ok(());
    }

    for name in names {
        println!("{}", name);
    }
    Ok(())
}

pub async fn show(api_url: Option<&str>, nome: &str) -> Result<()> {
    let vehicle = client(api_url)?.get(nome).await?;
    print_vehicle(&vehicle);
    Ok(())
}

pub async fn add(api_url: Option<&str>, nome: &str, modelo: &str, status: &str) -> Result<()> {
    let vehicle = client(api_url)?.create(nome, modelo, status).await?;
    Logger::success(format!(
        "Registered {} with id {}",
        Logger::brand_text(&vehicle.nome),
        vehicle.id
    ));
    print_vehicle(&vehicle);
    Ok(())
}

pub async fn set_status(api_url: Option<&str>, nome: &str, status: &str) -> Result<()> {
    let vehicle = client(api_url)?.set_status(nome, status).await?;
    Logger::success(format!(
        "{} is now {}",
        Logger::brand_text(&vehicle.nome),
        Logger::highlight(vehicle.status)
    ));
    Ok(())
}

pub async fn remove(api_url: Option<&str>, nome: &str) -> Result<()> {
    let vehicle = client(api_url)?.delete(nome).await?;
    Logger::success(format!(
        "Removed {} ({})",
        Logger::brand_text(&vehicle.nome),
        Logger::dim(&vehicle.modelo)
    ));
    Ok(())
}

fn client(api_url: Option<&str>) -> Result<ApiClient> {
    let session = Session::load()?;
    let base_url = session.resolve_api_url(api_url);
    if session.token.is_none() {
        return Err(anyhow!("Not logged in. Run `frota login` first."));
    }
    Ok(ApiClient::new(base_url, session.token))
}

fn print_vehicle(vehicle: &Vehicle) {
    Logger::header(format!("Vehicle {}", vehicle.nome));

    let mut table = Table::new();
    table.set_header(vec!["Id", "Nome", "Modelo", "Status"]);
    table.add_row(vec![
        vehicle.id.to_string(),
        vehicle.nome.clone(),
        vehicle.modelo.clone(),
        vehicle.status.to_string(),
    ]);
    println!("{}", table);
}
