use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Subcommand;
use pdfshelf_core::format_file_size;
use pdfshelf_service::{DirectorySink, SharedFiles};

use super::Context;

#[derive(Subcommand)]
pub enum SharedCommands {
    /// Show what a share link points to
    Show { share_id: String },
    /// Save a shared file into a directory
    Download {
        share_id: String,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

pub(crate) async fn run(ctx: &Context, cmd: SharedCommands) -> Result<()> {
    let shared = SharedFiles::new(ctx.session.api().clone(), ctx.objects.clone());
    match cmd {
        SharedCommands::Show { share_id } => {
            let file = shared.get(&share_id).await.context("could not open share link")?;
            println!("{}  {}  {}", file.name, format_file_size(file.size), file.created_at.format("%d/%m/%Y"));
        },
        SharedCommands::Download { share_id, out } => {
            let saved = shared.download(&share_id, &DirectorySink::new(out)).await.context("download failed")?;
            println!("{}", saved.display());
        },
    }
    Ok(())
}
