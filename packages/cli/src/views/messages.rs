use anyhow::{bail, Context, Result};
use api::{Message, MessageBackend};
use clap::Subcommand;

use crate::app::App;

#[derive(Debug, Subcommand)]
pub enum MessagesCommand {
    /// Conversation with another user, oldest first
    History { with: i64 },
    /// Send a message
    Send { to: i64, content: String },
}

pub async fn run(app: &App, command: MessagesCommand) -> Result<()> {
    let session = app.require_session()?;
    match command {
        MessagesCommand::History { with } => {
            let messages = app
                .api
                .chat_history(session.user_id, with)
                .await
                .with_context(|| format!("could not load conversation with user {with}"))?;
            if messages.is_empty() {
                println!("No messages.");
            }
            for message in &messages {
                println!("{}", render_message(message, session.user_id));
            }
        }
        MessagesCommand::Send { to, content } => {
            if content.trim().is_empty() {
                bail!("message is empty");
            }
            let message = app
                .api
                .send_message(session.user_id, to, &content)
                .await
                .with_context(|| format!("could not send message to user {to}"))?;
            println!("{}", render_message(&message, session.user_id));
        }
    }
    Ok(())
}

fn render_message(message: &Message, me: i64) -> String {
    let who = if message.sender.id == me {
        "me".to_string()
    } else {
        message.sender.display_name()
    };
    let when = message
        .sent_at
        .map(|t| t.format("%Y-%m-%d %H:%M ").to_string())
        .unwrap_or_default();
    format!("{when}{who}: {}", message.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Role, User};

    fn user(id: i64, first_name: &str) -> User {
        User {
            id,
            first_name: first_name.into(),
            last_name: "Doe".into(),
            email: format!("{first_name}@example.com"),
            role: Role::Traveler,
            is_verified: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_render_message_from_me_and_from_other() {
        let mut message = Message {
            id: 1,
            sender: user(7, "Ana"),
            receiver: user(8, "Ben"),
            content: "Hello".into(),
            sent_at: None,
            is_read: None,
        };
        assert_eq!(render_message(&message, 7), "me: Hello");

        std::mem::swap(&mut message.sender, &mut message.receiver);
        assert_eq!(render_message(&message, 7), "Ben Doe: Hello");
    }
}
