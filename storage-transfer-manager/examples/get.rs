/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use storage_transfer_manager::types::ConcurrencySetting;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "get")]
#[command(about = "Download an object, or a whole folder of objects, to a local destination.")]
pub struct Args {
    /// Container to download from
    #[arg(required = true)]
    container: String,

    /// Key of the object to download, or the folder prefix with --recursive
    #[arg(required = true)]
    key: String,

    /// Local destination path (file, or directory with --recursive)
    #[arg(required = true)]
    dest: PathBuf,

    /// Number of concurrent downloads to perform for a folder
    #[arg(long, default_value_t = 8)]
    concurrency: usize,

    /// Download every object under the given prefix
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    recursive: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = storage_transfer_manager::from_env()
        .concurrency(ConcurrencySetting::Explicit(args.concurrency))
        .load()
        .await;
    let client = storage_transfer_manager::Client::new(config);

    if args.recursive {
        let handle = client
            .download_folder()
            .container(args.container)
            .prefix(args.key)
            .destination(args.dest)
            .send()
            .await?;

        let summary = handle.join().await?;
        println!(
            "{} objects downloaded ({} bytes), {} failed",
            summary.objects_downloaded(),
            summary.total_bytes_transferred(),
            summary.failed_transfers().len()
        );

        for failed in summary.failed_transfers() {
            eprintln!("failed to download '{}': {}", failed.object().key(), failed.error());
        }
    } else {
        let output = client
            .download()
            .container(args.container)
            .key(&args.key)
            .destination(args.dest.clone())
            .progress_sink(move |update| {
                if let Some(percent) = update.percent() {
                    eprintln!("{percent}% ({} bytes)", update.bytes_transferred());
                }
            })
            .send()
            .await?;

        println!(
            "downloaded {} bytes to {}",
            output.bytes_transferred(),
            args.dest.display()
        );
    }

    Ok(())
}
