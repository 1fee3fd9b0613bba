use crate::client::ApiError;
use crate::data_provider::StatsProvider;
use crate::session::{Session, SessionStore};
use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

/// Ask for the password on stderr and read one line from stdin
pub fn prompt_password(username: &str) -> Result<String> {
    eprint!("Password for {}: ", username);
    io::stderr().flush().ok();
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Log in and persist the token together with the user's role
pub async fn login(
    client: &dyn StatsProvider,
    store: &SessionStore,
    username: &str,
    password: &str,
) -> Result<Session> {
    if username.trim().is_empty() || password.is_empty() {
        bail!("Username and password are required");
    }

    let token = match client.login(username.trim(), password).await {
        Ok(token) => token,
        Err(ApiError::Unauthorized) => bail!("Incorrect username or password"),
        Err(e) => return Err(e).context("Login failed"),
    };
    client.set_token(Some(token.access_token.clone())).await;
    let me = client.me().await.context("Failed to fetch user info")?;

    let session = Session {
        token: Some(token.access_token),
        username: Some(me.username),
        role: Some(me.role),
    };
    store.save(&session)?;
    tracing::info!("Logged in as {}", session.describe());
    Ok(session)
}

pub async fn run_login(
    client: &dyn StatsProvider,
    store: &SessionStore,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password(username)?,
    };
    let session = login(client, store, username, &password).await?;
    println!("Logged in as {}", session.describe());
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    store.clear()?;
    println!("Logged out");
    Ok(())
}

/// Show the stored session and check it against the server
pub async fn whoami(client: &dyn StatsProvider, store: &SessionStore) -> Result<()> {
    let session = store.load();
    if !session.is_logged_in() {
        println!("Not logged in");
        return Ok(());
    }
    match client.me().await {
        Ok(me) => println!("{} ({})", me.username, me.role),
        Err(ApiError::Unauthorized) => println!("Session expired; log in again"),
        Err(e) => return Err(e).context("Failed to fetch user info"),
    }
    Ok(())
}
