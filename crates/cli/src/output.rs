//! Terminal rendering

use notes_frontend_common::{Notification, NotificationLevel, Notifier, TokenClaims};
use notes_http::types::Note;
use std::io::Write;

/// Prints successes to stdout and errors to stderr
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{notification}"),
            NotificationLevel::Error => eprintln!("error: {notification}"),
        }
    }
}

pub fn render_notes(out: &mut impl Write, notes: &[Note]) -> std::io::Result<()> {
    if notes.is_empty() {
        return writeln!(out, "No notes yet.");
    }

    for note in notes {
        match &note.created_at {
            Some(created) => writeln!(out, "[{}] {} ({created})", note.id, note.title)?,
            None => writeln!(out, "[{}] {}", note.id, note.title)?,
        }
        for line in note.content.lines() {
            writeln!(out, "    {line}")?;
        }
    }
    Ok(())
}

pub fn render_claims(out: &mut impl Write, claims: &TokenClaims) -> std::io::Result<()> {
    if let Some(user_id) = claims.user_id() {
        writeln!(out, "user id:    {user_id}")?;
    }
    match claims.expires_at() {
        Some(at) => writeln!(out, "expires at: {}", at.to_rfc3339()),
        None => writeln!(out, "expires at: {} (unix)", claims.exp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, title: &str, content: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: None,
            author: None,
        }
    }

    #[test]
    fn test_render_notes() {
        let mut out = Vec::new();
        render_notes(&mut out, &[note(42, "groceries", "milk\neggs")]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[42] groceries\n    milk\n    eggs\n"
        );
    }

    #[test]
    fn test_render_empty() {
        let mut out = Vec::new();
        render_notes(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No notes yet.\n");
    }
}
