//! Message command handlers.

use serde::Serialize;
use tabled::Tabled;

use campus_api::models::Message;
use campus_api::notifications::MessageQuery;

use crate::cli::{MessageArgs, MessageCommand};
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled, Serialize)]
pub struct MessageRow {
    pub id: i64,
    pub from: String,
    pub content: String,
    pub read: bool,
    pub sent: String,
}

impl From<&Message> for MessageRow {
    fn from(m: &Message) -> Self {
        Self {
            id: m.id,
            from: m
                .sender_name
                .clone()
                .unwrap_or_else(|| format!("#{}", m.sender_id)),
            content: m.content.clone(),
            read: m.is_read,
            sent: m.created_at.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(ctx: &Ctx, args: MessageArgs) -> Result<(), CliError> {
    match args.command {
        MessageCommand::Send { to, content } => {
            // The send endpoint wants an explicit sender id.
            let sender = ctx
                .session
                .current_user()
                .ok_or(CliError::NotLoggedIn)?
                .id;
            let message = ctx.resolve(ctx.client().send_message(sender, to, &content).await)?;
            output::success(ctx.quiet, &format!("sent message #{}", message.id));
            Ok(())
        }

        MessageCommand::List { page, size, unread } => {
            let query = MessageQuery {
                current: Some(page),
                size: Some(size),
            };
            let result = ctx.resolve(ctx.client().list_messages(&query).await)?;
            let mut rows: Vec<MessageRow> = result.records.iter().map(MessageRow::from).collect();
            if unread {
                rows.retain(|r| !r.read);
            }
            output::print_list(ctx.format, &rows, |r| r.id.to_string())?;
            output::page_footer(ctx.quiet, rows.len(), result.total);
            Ok(())
        }

        MessageCommand::Read { id } => {
            ctx.resolve(ctx.client().mark_message_read(id).await)?;
            output::success(ctx.quiet, &format!("message #{id} marked read"));
            Ok(())
        }

        MessageCommand::Unread => {
            let count = ctx.resolve(ctx.client().unread_count().await)?;
            println!("{}", count.count);
            Ok(())
        }
    }
}
