use crate::config::{Config, JWT_SECRET_ENV};

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with default settings.");
        println!();
        println!("Set security.jwt_secret (or {JWT_SECRET_ENV}) before running 'qrforge serve'.");
    } else {
        println!("config.toml already exists, leaving it untouched.");
    }
    Ok(())
}
