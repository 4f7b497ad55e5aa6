use anyhow::{Result, anyhow};
use clap::Args;
use pdfshelf_core::RegistrationForm;

use super::Context;

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    surname: String,
    /// Date of birth as YYYY-MM-DD
    #[arg(long)]
    dob: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
}

pub(crate) async fn run_login(ctx: &Context, email: &str, password: &str) -> Result<()> {
    let user = ctx.session.login(email, password).await.map_err(|e| anyhow!(e.login_message()))?;
    println!("Signed in as {} <{}>", user.full_name(), user.email);
    Ok(())
}

pub(crate) async fn run_register(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let form = RegistrationForm {
        first_name: args.first_name,
        surname: args.surname,
        dob: args.dob,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
    };
    if let Err(e) = ctx.session.register(&form).await {
        if let Some(errors) = e.validation() {
            for error in errors.errors() {
                eprintln!("  {error}");
            }
            return Err(anyhow!("Registration form has errors"));
        }
        return Err(anyhow!("Registration failed: {}", e.user_message()));
    }
    println!("Registration successful. You can now sign in.");
    Ok(())
}

pub(crate) fn run_logout(ctx: &Context) -> Result<()> {
    ctx.session.logout()?;
    println!("Signed out");
    Ok(())
}

pub(crate) async fn run_whoami(ctx: &Context) -> Result<()> {
    match ctx.session.init().await? {
        Some(user) => println!("{} <{}> (id {})", user.full_name(), user.email, user.id),
        None => println!("Not signed in"),
    }
    Ok(())
}
