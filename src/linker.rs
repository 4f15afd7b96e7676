//! Graph linker: wires attachments into messages and messages into threads
//! by walking the join tables in row order.

use tracing::debug;

use crate::builder::{Threads, WorkingSet};
use crate::error::{ExportError, Result};
use crate::models::{Attachment, JoinRow, Message};
use crate::schema::{chat_handle_join, chat_message_join, message_attachment_join};

/// Counts gathered while linking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Attachment references that resolved to `{}`
    pub attachment_placeholders: usize,
    /// Message references that resolved to `{}`
    pub message_placeholders: usize,
    /// Attachments no message claimed
    pub orphan_attachments: usize,
    /// Messages no thread claimed
    pub orphan_messages: usize,
}

/// Append each joined attachment to its message, claiming it.
///
/// Returns how many joins fell back to the placeholder.
pub fn link_attachments(
    messages: &mut WorkingSet<Message>,
    attachments: &mut WorkingSet<Attachment>,
    joins: &[JoinRow],
) -> Result<usize> {
    let mut placeholders = 0;
    for join in joins {
        let message = messages.get_mut(join.owner_id).ok_or(ExportError::DanglingReference {
            table: message_attachment_join::TABLE,
            id: join.owner_id,
        })?;
        let attachment = attachments.claim(join.member_id);
        if attachment.is_missing() {
            debug!(
                message_id = join.owner_id,
                attachment_id = join.member_id,
                "Unresolved attachment"
            );
            placeholders += 1;
        }
        message.attachments.push(attachment);
    }
    Ok(placeholders)
}

/// Add each joined handle to its thread's participant set.
pub fn link_participants(threads: &mut Threads, joins: &[JoinRow]) -> Result<()> {
    for join in joins {
        let thread = threads.get_mut(&join.owner_id).ok_or(ExportError::DanglingReference {
            table: chat_handle_join::TABLE,
            id: join.owner_id,
        })?;
        thread.address_ids.insert(join.member_id);
    }
    Ok(())
}

/// Append each joined message to its thread, claiming it.
///
/// Returns how many joins fell back to the placeholder.
pub fn link_messages(
    threads: &mut Threads,
    messages: &mut WorkingSet<Message>,
    joins: &[JoinRow],
) -> Result<usize> {
    let mut placeholders = 0;
    for join in joins {
        let thread = threads.get_mut(&join.owner_id).ok_or(ExportError::DanglingReference {
            table: chat_message_join::TABLE,
            id: join.owner_id,
        })?;
        let message = messages.claim(join.member_id);
        if message.is_missing() {
            debug!(chat_id = join.owner_id, message_id = join.member_id, "Unresolved message");
            placeholders += 1;
        }
        thread.messages.push(message);
    }
    Ok(placeholders)
}

/// Run every linking pass. Whatever is left in the working sets afterwards
/// is orphaned and dropped with them.
pub fn link(
    threads: &mut Threads,
    mut messages: WorkingSet<Message>,
    mut attachments: WorkingSet<Attachment>,
    message_attachments: &[JoinRow],
    chat_handles: &[JoinRow],
    chat_messages: &[JoinRow],
) -> Result<LinkReport> {
    let attachment_placeholders =
        link_attachments(&mut messages, &mut attachments, message_attachments)?;
    link_participants(threads, chat_handles)?;
    let message_placeholders = link_messages(threads, &mut messages, chat_messages)?;

    Ok(LinkReport {
        attachment_placeholders,
        message_placeholders,
        orphan_attachments: attachments.remaining(),
        orphan_messages: messages.remaining(),
    })
}
