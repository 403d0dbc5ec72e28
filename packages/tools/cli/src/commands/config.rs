//! 설정 명령어

use crate::config::CliConfig;

pub fn set(
    base_url: Option<String>,
    login_path: Option<String>,
    admin_role: Option<String>,
) -> anyhow::Result<()> {
    let mut config = CliConfig::load().unwrap_or_default();

    if let Some(url) = base_url {
        helpme_client::config::parse_base_url(&url)?;
        config.base_url = Some(url);
    }
    if let Some(path) = login_path {
        config.login_path = Some(path);
    }
    if let Some(role) = admin_role {
        config.admin_role = Some(role);
    }

    config.save()?;
    println!("Config updated.");
    show()
}

pub fn show() -> anyhow::Result<()> {
    let config = CliConfig::load().unwrap_or_default();

    println!("Current config (~/.helpme/config.json):");
    println!("  base_url:   {}", config.base_url.as_deref().unwrap_or("(not set)"));
    println!("  login_path: {}", config.login_path.as_deref().unwrap_or("(not set)"));
    println!("  admin_role: {}", config.admin_role.as_deref().unwrap_or("(not set)"));

    Ok(())
}
