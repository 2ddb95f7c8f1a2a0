// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `strand session` - Session management commands

use anyhow::Result;
use clap::{Args, Subcommand};

use strand_core::SessionId;

use crate::output::{format_or_json, format_timestamp, OutputFormat};

#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// List sessions
    List,
    /// Create a new session
    Create {
        /// Session name
        name: String,
    },
    /// Show details of a session
    Show {
        /// Session ID
        id: String,
    },
    /// Delete a session and everything in it
    Delete {
        /// Session ID
        id: String,
    },
}

pub async fn handle(args: SessionArgs, format: OutputFormat) -> Result<()> {
    let client = super::client()?;
    match args.command {
        SessionCommand::List => {
            let mut sessions = client.list_sessions().await?;
            sessions.sort_by(|a, b| a.name.cmp(&b.name));
            format_or_json(format, &sessions, || {
                if sessions.is_empty() {
                    println!("No sessions");
                    return;
                }
                println!("{:<24} {:<20} NAME", "ID", "CREATED");
                for s in &sessions {
                    println!(
                        "{:<24} {:<20} {}",
                        s.session_id,
                        format_timestamp(&s.created),
                        s.name
                    );
                }
            })?;
        }
        SessionCommand::Create { name } => {
            let id = client.create_session(&name).await?;
            println!("{id}");
        }
        SessionCommand::Show { id } => {
            let session = client.get_session(&SessionId::from(id.as_str())).await?;
            format_or_json(format, &session, || {
                println!("Session:  {}", session.session_id);
                println!("Name:     {}", session.name);
                println!("Created:  {}", format_timestamp(&session.created));
                println!("Accessed: {}", format_timestamp(&session.accessed));
                if let Some(notes) = session.notes.as_deref().filter(|n| !n.is_empty()) {
                    println!("Notes:    {notes}");
                }
            })?;
        }
        SessionCommand::Delete { id } => {
            let id = SessionId::from(id.as_str());
            client.delete_session(&id).await?;
            println!("deleted session {id}");
        }
    }
    Ok(())
}
