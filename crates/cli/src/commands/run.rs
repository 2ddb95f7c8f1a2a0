// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `strand run` - Submit a tool run, optionally following it live

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use strand_core::DatasetId;

use super::follow::follow_job;

#[derive(Args)]
pub struct RunArgs {
    /// Tool to run
    pub tool: String,

    /// Input dataset ID (can be repeated)
    #[arg(long = "input", short = 'i')]
    pub inputs: Vec<String>,

    /// Stay attached: stream state transitions, screen output and result
    /// datasets until the job reaches a terminal state
    #[arg(long, short = 'f')]
    pub follow: bool,
}

pub async fn handle(args: RunArgs, session: Option<&str>) -> Result<()> {
    let client = super::client()?;
    let session = super::resolve_session(session)?;

    let inputs: Vec<DatasetId> =
        args.inputs.iter().map(|s| DatasetId::from(s.as_str())).collect();
    let job_id = client.submit_job(&session, &args.tool, &inputs).await?;
    println!("{job_id}");

    if args.follow {
        follow_job(Arc::new(client), session, job_id).await?;
    }
    Ok(())
}
