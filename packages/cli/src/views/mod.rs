//! Subcommands. Each module owns its arguments, its handler and the plain
//! text rendering of what it prints.

use anyhow::Result;
use clap::Subcommand;

use crate::app::App;

mod account;
mod booking;
mod messages;
mod notifications;
mod properties;
mod reservations;
mod reviews;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session
    Login(account::LoginArgs),
    /// Create an account
    Register(account::RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List, watch or mark notifications
    #[command(subcommand)]
    Notifications(notifications::NotificationsCommand),
    /// Browse listings
    #[command(subcommand)]
    Properties(properties::PropertiesCommand),
    /// Price a stay without booking it
    Quote(booking::QuoteArgs),
    /// Reserve a stay and pay for it with a mock transaction
    Book(booking::BookArgs),
    /// Manage reservations
    #[command(subcommand)]
    Reservations(reservations::ReservationsCommand),
    /// Read and write reviews
    #[command(subcommand)]
    Reviews(reviews::ReviewsCommand),
    /// Chat with another user
    #[command(subcommand)]
    Messages(messages::MessagesCommand),
}

pub async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Login(args) => account::login(app, args).await,
        Command::Register(args) => account::register(app, args).await,
        Command::Logout => account::logout(app),
        Command::Whoami => account::whoami(app),
        Command::Notifications(command) => notifications::run(app, command).await,
        Command::Properties(command) => properties::run(app, command).await,
        Command::Quote(args) => booking::quote(app, args).await,
        Command::Book(args) => booking::book(app, args).await,
        Command::Reservations(command) => reservations::run(app, command).await,
        Command::Reviews(command) => reviews::run(app, command).await,
        Command::Messages(command) => messages::run(app, command).await,
    }
}
