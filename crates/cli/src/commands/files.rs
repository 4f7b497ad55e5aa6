use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Subcommand;
use pdfshelf_core::UploadDraft;
use pdfshelf_service::{DeleteOutcome, DirectorySink, FileList, FileResource, ListController};

use super::Context;
use crate::ui;

#[derive(Subcommand)]
pub enum FileCommands {
    /// List your files, optionally filtered by name
    List {
        #[arg(short, long, default_value = "1")]
        page: usize,
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Search your files by name
    Search {
        query: String,
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Upload a PDF
    Upload { path: PathBuf },
    /// Save a file into a directory
    Download {
        id: u64,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Delete a file
    Delete {
        id: u64,
        /// Page to show afterwards
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Create a share link
    Share { id: u64 },
    /// Fetch a file for viewing and print where it was stored
    View { id: u64 },
}

pub(crate) async fn run(ctx: &Context, cmd: FileCommands) -> Result<()> {
    ctx.signed_in().await?;
    let resource = FileResource::new(ctx.session.clone());
    let list: FileList = ListController::new(resource.clone(), ctx.list_options());

    match cmd {
        FileCommands::List { page, search } => {
            list.load(page, &search).await.context("could not load files")?;
            ui::print_files(&list.view().await, ctx.json)?;
        },
        FileCommands::Search { query, page } => {
            list.load(page, &query).await.context("search failed")?;
            ui::print_files(&list.view().await, ctx.json)?;
        },
        FileCommands::Upload { path } => {
            let content = tokio::fs::read(&path).await.with_context(|| format!("reading {}", path.display()))?;
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            list.load(1, "").await.context("could not load files")?;
            list.add(UploadDraft::from_path_name(name, content)).await.context("upload failed")?;
            ui::print_files(&list.view().await, ctx.json)?;
        },
        FileCommands::Download { id, out } => {
            let saved = list.download(id, &DirectorySink::new(out)).await.context("download failed")?;
            println!("{}", saved.display());
        },
        FileCommands::Delete { id, page } => {
            list.load(page, "").await.context("could not load files")?;
            let confirm = ctx.confirm();
            if list.delete(id, confirm.as_ref()).await.context("delete failed")? == DeleteOutcome::Cancelled {
                println!("Cancelled");
                return Ok(());
            }
            ui::print_files(&list.view().await, ctx.json)?;
        },
        FileCommands::Share { id } => {
            let link = resource.share(id).await.context("share failed")?;
            println!("{}", link.shareable_link);
        },
        FileCommands::View { id } => {
            let handle = resource.preview(id, ctx.objects.clone()).await.context("could not open file")?;
            println!("{}", handle.location().display());
            ui::wait_for_enter("Press Enter when done viewing").await;
            drop(handle);
        },
    }
    list.close().await;
    Ok(())
}
