// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `strand job` - Job management commands

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};

use strand_core::JobId;

use crate::output::{format_or_json, format_timestamp, truncate, OutputFormat};

use super::follow::follow_job;

#[derive(Args)]
pub struct JobArgs {
    #[command(subcommand)]
    pub command: JobCommand,
}

#[derive(Subcommand)]
pub enum JobCommand {
    /// List jobs in the session
    List {
        /// Filter by state (e.g. "RUNNING", "COMPLETED")
        #[arg(long)]
        state: Option<String>,
    },
    /// Show details of a job
    Show {
        /// Job ID
        id: String,

        /// Include the full screen output
        #[arg(long, short = 'v')]
        verbose: bool,
    },
    /// Request cancellation of a running job
    Cancel {
        /// Job ID
        id: String,
    },
    /// Follow a job live: state transitions, screen output, result datasets
    Follow {
        /// Job ID
        id: String,
    },
}

pub async fn handle(args: JobArgs, session: Option<&str>, format: OutputFormat) -> Result<()> {
    let client = super::client()?;
    let session = super::resolve_session(session)?;
    match args.command {
        JobCommand::List { state } => {
            let mut jobs = client.list_jobs(&session).await?;
            if let Some(ref wanted) = state {
                let wanted = wanted.to_uppercase();
                jobs.retain(|j| j.state.as_str() == wanted);
            }
            jobs.sort_by(|a, b| a.created.cmp(&b.created));
            format_or_json(format, &jobs, || {
                if jobs.is_empty() {
                    println!("No jobs");
                    return;
                }
                println!("{:<24} {:<14} {:<20} TOOL", "ID", "STATE", "CREATED");
                for j in &jobs {
                    println!(
                        "{:<24} {:<14} {:<20} {}",
                        j.job_id,
                        j.state.as_str(),
                        format_timestamp(&j.created),
                        truncate(j.tool_name.as_deref().unwrap_or(&j.tool_id), 40)
                    );
                }
            })?;
        }
        JobCommand::Show { id, verbose } => {
            let job = client.get_job(&session, &JobId::from(id.as_str())).await?;
            format_or_json(format, &job, || {
                println!("Job:     {}", job.job_id);
                println!("Tool:    {}", job.tool_name.as_deref().unwrap_or(&job.tool_id));
                match job.state_detail.as_deref().filter(|d| !d.is_empty()) {
                    Some(detail) => println!("State:   {} ({detail})", job.state),
                    None => println!("State:   {}", job.state),
                }
                println!("Created: {}", format_timestamp(&job.created));
                println!("Started: {}", format_timestamp(&job.start_time));
                println!("Ended:   {}", format_timestamp(&job.end_time));
                if !job.parameters.is_empty() {
                    println!("Parameters:");
                    for p in &job.parameters {
                        println!(
                            "  {} = {}",
                            p.display_name.as_deref().unwrap_or(&p.parameter_id),
                            p.value.as_deref().unwrap_or("-")
                        );
                    }
                }
                if verbose {
                    if let Some(output) = job.screen_output.as_deref() {
                        println!("--- screen output ---");
                        print!("{output}");
                        if !output.ends_with('\n') {
                            println!();
                        }
                    }
                }
            })?;
        }
        JobCommand::Cancel { id } => {
            let id = JobId::from(id.as_str());
            client.cancel_job(&session, &id).await?;
            println!("cancel requested for job {id}");
        }
        JobCommand::Follow { id } => {
            follow_job(Arc::new(client), session, JobId::from(id.as_str())).await?;
        }
    }
    Ok(())
}
