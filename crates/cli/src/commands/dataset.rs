// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `strand dataset` - Dataset management commands

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use strand_core::DatasetId;

use crate::output::{format_or_json, format_size, format_timestamp, truncate, OutputFormat};

#[derive(Args)]
pub struct DatasetArgs {
    #[command(subcommand)]
    pub command: DatasetCommand,
}

#[derive(Subcommand)]
pub enum DatasetCommand {
    /// List datasets in the session
    List,
    /// Show details of a dataset
    Show {
        /// Dataset ID
        id: String,
    },
    /// Delete a dataset
    Delete {
        /// Dataset ID
        id: String,
    },
    /// Upload a local file as a new dataset
    Upload {
        /// File to upload
        path: PathBuf,
    },
    /// Download a dataset's file content
    Download {
        /// Dataset ID
        id: String,

        /// Destination path (defaults to the dataset name)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

pub async fn handle(
    args: DatasetArgs,
    session: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let client = super::client()?;
    let session = super::resolve_session(session)?;
    match args.command {
        DatasetCommand::List => {
            let mut datasets = client.list_datasets(&session).await?;
            datasets.sort_by(|a, b| a.created.cmp(&b.created));
            format_or_json(format, &datasets, || {
                if datasets.is_empty() {
                    println!("No datasets");
                    return;
                }
                println!("{:<24} {:>10} {:<20} NAME", "ID", "SIZE", "CREATED");
                for d in &datasets {
                    println!(
                        "{:<24} {:>10} {:<20} {}",
                        d.dataset_id,
                        format_size(d.size),
                        format_timestamp(&d.created),
                        truncate(&d.name, 60)
                    );
                }
            })?;
        }
        DatasetCommand::Show { id } => {
            let dataset = client
                .get_dataset(&session, &DatasetId::from(id.as_str()))
                .await?;
            format_or_json(format, &dataset, || {
                println!("Dataset: {}", dataset.dataset_id);
                println!("Name:    {}", dataset.name);
                println!("Size:    {}", format_size(dataset.size));
                println!("Created: {}", format_timestamp(&dataset.created));
                if let Some(job) = &dataset.source_job {
                    println!("Source:  {job}");
                }
                if let Some(state) = &dataset.file_state {
                    println!("File:    {state:?}");
                }
            })?;
        }
        DatasetCommand::Delete { id } => {
            let id = DatasetId::from(id.as_str());
            client.delete_dataset(&session, &id).await?;
            println!("deleted dataset {id}");
        }
        DatasetCommand::Upload { path } => {
            let id = client.upload_dataset(&session, &path).await?;
            println!("{id}");
        }
        DatasetCommand::Download { id, output } => {
            let id = DatasetId::from(id.as_str());
            let dest = match output {
                Some(path) => path,
                None => {
                    let dataset = client.get_dataset(&session, &id).await?;
                    PathBuf::from(dataset.name)
                }
            };
            let written = client.download_dataset(&session, &id, &dest).await?;
            println!("{} ({})", dest.display(), format_size(Some(written)));
        }
    }
    Ok(())
}
