use crate::config::Config;
use crate::error::Result;

/// Print the effective configuration and where it came from
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    println!("config file: {}", Config::config_path().display());
    println!("api_url:     {}", config.api_url()?);
    println!(
        "department:  {}",
        config.default_department.as_deref().unwrap_or("(none)")
    );
    Ok(())
}

pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    match config.get(key)? {
        Some(value) => println!("{}", value),
        None => println!("(unset)"),
    }
    Ok(())
}

pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    println!("{} = {}", key, value);
    Ok(())
}
