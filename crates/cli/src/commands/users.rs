use anyhow::{Context as _, Result, anyhow};
use clap::Subcommand;
use pdfshelf_core::UserForm;
use pdfshelf_service::{DeleteOutcome, ListController, UserList, UserResource};

use super::Context;
use crate::ui;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users, optionally filtered by name, email or birth date
    List {
        #[arg(short, long, default_value = "1")]
        page: usize,
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Add a user
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        email: String,
        /// Date of birth as YYYY-MM-DD
        #[arg(long)]
        dob: String,
    },
    /// Change a user; omitted fields keep their value
    Edit {
        id: u64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        surname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        dob: Option<String>,
    },
    /// Delete a user
    Delete { id: u64 },
    /// Put the given ids first, in that order; the rest follow as before
    Reorder {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
    },
    /// Move a user to a 1-based position in the list order
    Move { id: u64, position: usize },
}

pub(crate) async fn run(ctx: &Context, cmd: UserCommands) -> Result<()> {
    ctx.signed_in().await?;
    let list: UserList = ListController::new(UserResource::new(ctx.session.clone()), ctx.list_options());
    list.load(1, "").await.context("could not load users")?;

    match cmd {
        UserCommands::List { page, search } => {
            list.load(page, &search).await?;
        },
        UserCommands::Add { first_name, surname, email, dob } => {
            let form = UserForm { first_name, surname, email, dob };
            list.add(form).await.context("could not add user")?;
        },
        UserCommands::Edit { id, first_name, surname, email, dob } => {
            let current = list
                .snapshot()
                .await
                .items
                .into_iter()
                .find(|u| u.id == id)
                .ok_or_else(|| anyhow!("No user with id {id}"))?;
            let form = UserForm {
                first_name: first_name.unwrap_or(current.first_name),
                surname: surname.unwrap_or(current.surname),
                email: email.unwrap_or(current.email),
                dob: dob.or_else(|| current.dob.map(|d| d.format("%Y-%m-%d").to_string())).unwrap_or_default(),
            };
            list.edit(id, form).await.context("could not update user")?;
        },
        UserCommands::Delete { id } => {
            let confirm = ctx.confirm();
            if list.delete(id, confirm.as_ref()).await.context("could not delete user")? == DeleteOutcome::Cancelled {
                println!("Cancelled");
                return Ok(());
            }
        },
        UserCommands::Reorder { ids } => {
            let mut pool = list.snapshot().await.items;
            let mut order = Vec::with_capacity(ids.len());
            for id in ids {
                let at = pool.iter().position(|u| u.id == id).ok_or_else(|| anyhow!("No user with id {id}"))?;
                order.push(pool.remove(at));
            }
            order.extend(pool);
            list.reorder(order).await.context("could not reorder users")?;
        },
        UserCommands::Move { id, position } => {
            list.move_item(id, position).await.context("could not reorder users")?;
        },
    }
    ui::print_users(&list.view().await, ctx.json)?;
    list.close().await;
    Ok(())
}
