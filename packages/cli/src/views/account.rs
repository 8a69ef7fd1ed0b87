use anyhow::{Context, Result};
use api::{Credentials, RegisterRequest, Role, Session};
use clap::{Args, ValueEnum};

use crate::app::App;

#[derive(Debug, Args)]
pub struct LoginArgs {
    email: String,
    #[arg(long, env = "STAYKONNECT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AccountType {
    Traveler,
    Host,
}

impl From<AccountType> for Role {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Traveler => Role::Traveler,
            AccountType::Host => Role::Host,
        }
    }
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    email: String,
    #[arg(long, env = "STAYKONNECT_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long, value_enum, default_value_t = AccountType::Traveler)]
    role: AccountType,
}

pub async fn login(app: &App, args: LoginArgs) -> Result<()> {
    let credentials = Credentials::new(args.email, args.password);
    let session = app
        .session
        .login(app.api.as_ref(), &credentials)
        .await
        .context("login failed")?;
    println!("{}", render_session(&session));
    Ok(())
}

pub async fn register(app: &App, args: RegisterArgs) -> Result<()> {
    let request = RegisterRequest {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password: args.password,
        role: args.role.into(),
    };
    app.session
        .register(app.api.as_ref(), &request)
        .await
        .context("registration failed")?;
    println!("Account created for {}. Log in to continue.", request.email);
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.session.logout().context("could not remove the stored session")?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    match app.session.current() {
        Some(session) => println!("{}", render_session(&session)),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn render_session(session: &Session) -> String {
    format!(
        "Logged in as {} (user {}, {})",
        session.email, session.user_id, session.role
    )
}
