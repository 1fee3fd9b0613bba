use crate::client::ApiError;
use crate::commands::auth::prompt_password;
use crate::commands::require_admin;
use crate::data_provider::StatsProvider;
use crate::session::Session;
use crate::types::{NewUser, Role};
use anyhow::{bail, Context, Result};

/// Create an account after local validation, returning the new user id
pub async fn add(client: &dyn StatsProvider, session: &Session, user: NewUser) -> Result<i64> {
    require_admin(session)?;
    let username = user.username.trim().to_string();
    if username.is_empty() {
        bail!("Username cannot be empty");
    }
    if user.password.is_empty() {
        bail!("Password cannot be empty");
    }

    let user = NewUser { username, ..user };
    match client.create_user(&user).await {
        Ok(id) => {
            tracing::info!("Created user {} ({}) as {}", id, user.username, user.role);
            Ok(id)
        }
        Err(ApiError::Conflict(_)) => bail!("Username '{}' already exists", user.username),
        Err(e) => Err(e).context("Failed to create user"),
    }
}

pub async fn run_add(
    client: &dyn StatsProvider,
    session: &Session,
    username: &str,
    password: Option<String>,
    role: Role,
) -> Result<()> {
    require_admin(session)?;
    let password = match password {
        Some(password) => password,
        None => prompt_password(username)?,
    };
    let user = NewUser {
        username: username.to_string(),
        password,
        role,
    };
    let id = add(client, session, user).await?;
    println!("Created user {} ({}, {})", id, username.trim(), role);
    Ok(())
}
