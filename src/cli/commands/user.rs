//! User account commands

use crate::config::Config;
use crate::db::Store;
use crate::models::Role;

pub async fn cmd_user_add(
    config: &Config,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<()> {
    let role: Role = role.parse()?;
    let store = Store::new(&config.general.database_url).await?;

    if store.get_user_by_email(email).await?.is_some() {
        anyhow::bail!("A user with email '{email}' already exists");
    }

    let user = store
        .create_user(email, password, role, &config.security)
        .await?;

    println!("Created {} user {}", user.role, user.email);
    println!("  ID: {}", user.id);

    store.close().await?;
    Ok(())
}

pub async fn cmd_user_list(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_url).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users yet.");
        println!();
        println!("Add one with: qrforge user add <email> <password> [--role ROLE]");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        println!("{} [{}]", user.email, user.role);
        println!("  ID: {} | Created: {}", user.id, user.created_at);
    }

    store.close().await?;
    Ok(())
}
