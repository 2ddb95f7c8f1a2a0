// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `strand login` - Authenticate and store a token

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;

use strand_client::{Config, RestClient};

#[derive(Args)]
pub struct LoginArgs {
    /// Session database base URL (stored in the config file)
    #[arg(long)]
    pub url: Option<String>,

    /// Username (prompted when omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,
}

pub async fn handle(args: LoginArgs) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = args.url {
        config.server_url = url;
    }
    if config.server_url.is_empty() {
        anyhow::bail!("no server URL: pass --url or set STRAND_SERVER_URL");
    }

    let username = match args.username.or_else(|| config.username.clone()) {
        Some(u) => u,
        None => prompt("username: ")?,
    };
    let password = prompt("password: ")?;

    let client = RestClient::new(config.clone())?;
    let token = client.login(&username, &password).await?;

    config.username = Some(username.clone());
    config.token = Some(token);
    let path = config.save()?;
    println!("logged in as {username}, token stored in {}", path.display());
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
