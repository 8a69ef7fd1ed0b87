use anyhow::{Context, Result};
use api::NotificationRecord;
use clap::Subcommand;
use client::MarkReadOutcome;

use crate::app::App;

#[derive(Debug, Subcommand)]
pub enum NotificationsCommand {
    /// Fetch and print notifications once
    List {
        /// Only unread ones
        #[arg(long)]
        unread: bool,
    },
    /// Keep polling and print the unread count whenever it changes
    Watch,
    /// Mark one notification as read
    Read { id: i64 },
}

pub async fn run(app: &App, command: NotificationsCommand) -> Result<()> {
    app.require_session()?;
    let cache = app.notification_cache();

    match command {
        NotificationsCommand::List { unread } => {
            cache.fetch_now().await.context("could not load notifications")?;
            let records = cache.notifications();
            println!("{} unread", cache.unread_count());
            for record in records.iter().filter(|r| !unread || !r.is_read) {
                println!("{}", render_notification(record));
            }
        }
        NotificationsCommand::Watch => {
            cache.subscribe_unread_count(|unread| println!("{unread} unread"));
            cache.start();
            println!(
                "Polling every {}s, Ctrl-C to stop.",
                cache.period().as_secs()
            );
            tokio::signal::ctrl_c()
                .await
                .context("could not listen for Ctrl-C")?;
            cache.stop();
        }
        NotificationsCommand::Read { id } => {
            let loaded = cache.fetch_now().await.context("could not load notifications")?;
            tracing::debug!(?loaded, "notifications loaded before mark-read");
            match cache
                .mark_read(id)
                .await
                .with_context(|| format!("could not mark notification {id} as read"))?
            {
                MarkReadOutcome::Marked { was_unread: true } => {
                    println!("Marked {id} as read, {} unread left.", cache.unread_count())
                }
                MarkReadOutcome::Marked { was_unread: false } => {
                    println!("{id} was already read.")
                }
                MarkReadOutcome::NotFound => println!("No notification {id} in your list."),
            }
        }
    }
    Ok(())
}

fn render_notification(record: &NotificationRecord) -> String {
    let marker = if record.is_read { ' ' } else { '*' };
    format!(
        "{marker} #{:<5} {}  [{}] {}",
        record.id,
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.kind(),
        record.message
    )
}
