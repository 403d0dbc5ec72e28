//! 인증 명령어

use std::io::{self, Write};

use helpme_core::auth::{Credentials, Identity};
use serde_json::json;

use super::output::{print_json, OutputFormat};
use crate::context::{self, AppContext};

pub async fn login(
    ctx: &AppContext,
    username: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => read_password()?,
    };

    let identity = ctx
        .stack
        .gate()
        .login(Credentials::new(username, password))
        .await?;

    match ctx.format {
        OutputFormat::Json => print_json(&identity_json(&identity)),
        OutputFormat::Text => {
            let name = identity
                .user()
                .map(|u| u.display_name())
                .unwrap_or_default();
            println!("Logged in as {}.", name);
            if identity.is_admin() {
                println!("Administrator access enabled.");
            }
            Ok(())
        }
    }
}

pub fn logout() -> anyhow::Result<()> {
    let session = context::open_session()?;
    let was_active = !session.snapshot().is_empty();
    session.clear()?;

    if was_active {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> anyhow::Result<()> {
    let identity = ctx.stack.gate().current_identity();

    match ctx.format {
        OutputFormat::Json => print_json(&identity_json(&identity)),
        OutputFormat::Text => {
            match identity.user() {
                Some(user) => {
                    println!("{} (id {})", user.display_name(), user.id);
                    println!("  role:  {}", user.role);
                    println!("  admin: {}", if identity.is_admin() { "yes" } else { "no" });
                }
                None => println!("Not logged in"),
            }
            Ok(())
        }
    }
}

fn identity_json(identity: &Identity) -> serde_json::Value {
    json!({
        "user": identity.user(),
        "isAdmin": identity.is_admin(),
    })
}

fn read_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("Password is required");
    }
    Ok(password)
}
