//! Terminal rendering and prompts.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use async_trait::async_trait;
use pdfshelf_core::{FileRecord, User, format_file_size};
use pdfshelf_service::{Confirm, ListView, Notifier};

/// Successes to stdout, errors to stderr.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrintNotifier;

impl Notifier for PrintNotifier {
    fn success(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Asks on the terminal; anything but `y`/`yes` declines.
pub(crate) struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = format!("{prompt} [y/N] ");
        tokio::task::spawn_blocking(move || {
            print!("{prompt}");
            io::stdout().flush().ok();
            let mut answer = String::new();
            if io::stdin().lock().read_line(&mut answer).is_err() {
                return false;
            }
            matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
        })
        .await
        .unwrap_or(false)
    }
}

pub(crate) async fn wait_for_enter(prompt: &str) {
    let prompt = prompt.to_owned();
    let waited = tokio::task::spawn_blocking(move || {
        eprint!("{prompt}");
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).map(|_| ())
    })
    .await;
    if !matches!(waited, Ok(Ok(()))) {
        tracing::debug!("stdin closed while waiting");
    }
}

fn footer<T>(view: &ListView<T>, label: &str) {
    println!(
        "Page {} of {} ({} {label}{})",
        view.current_page,
        view.total_pages,
        view.total_items,
        if view.total_items == 1 { "" } else { "s" }
    );
    if let Some(error) = &view.error {
        eprintln!("{error}");
    }
}

pub(crate) fn print_files(view: &ListView<FileRecord>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }
    if view.items.is_empty() {
        println!("No files found");
    }
    for file in &view.items {
        println!(
            "{:>6}  {:<40}  {:>10}  {}",
            file.id,
            file.name,
            format_file_size(file.size),
            file.created_at.format("%d/%m/%Y")
        );
    }
    footer(view, "file");
    Ok(())
}

pub(crate) fn print_users(view: &ListView<User>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }
    if view.items.is_empty() {
        println!("No users found");
    }
    for user in &view.items {
        println!("{:>6}  {:<30}  {:<32}  {}", user.id, user.full_name(), user.email, user.dob_display());
    }
    footer(view, "user");
    Ok(())
}
