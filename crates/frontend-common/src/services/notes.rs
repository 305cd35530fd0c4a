//! Notes page actions

use crate::notify::{Notification, Notifier};
use notes_http::types::{Note, NoteCreateRequest};
use notes_http::{ClientError, NotesClient, StatusCode};
use std::sync::Arc;
use tracing::{debug, warn};

/// State and actions behind the notes list view
///
/// Create and delete always re-fetch the list once the server has answered,
/// whatever the status. A failed fetch keeps the list from the last
/// successful one.
pub struct NotesPage {
    client: NotesClient,
    notifier: Arc<dyn Notifier>,
    notes: Vec<Note>,
}

impl NotesPage {
    pub fn new(client: NotesClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            notes: Vec::new(),
        }
    }

    /// Notes from the last successful fetch
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Fetch the caller's notes
    pub async fn load_notes(&mut self) -> Result<&[Note], ClientError> {
        match self.fetch().await {
            Ok(notes) => {
                debug!(count = notes.len(), "Notes loaded");
                self.notes = notes;
                Ok(&self.notes)
            }
            Err(e) => {
                warn!(error = %e, "Could not load notes");
                self.notifier.notify(Notification::error(e.to_string()));
                Err(e)
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Note>, ClientError> {
        let response = self.client.list_notes().await?;
        if response.status() != StatusCode::OK {
            return Err(response.server_error().into());
        }
        response.json()
    }

    /// Create a note; only 201 counts as created
    pub async fn create_note(&mut self, title: &str, content: &str) -> Result<(), ClientError> {
        let request = NoteCreateRequest {
            title: title.to_string(),
            content: content.to_string(),
        };

        let response = match self.client.create_note(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Create note request failed");
                self.notifier
                    .notify(Notification::error(format!("Failed to create note: {e}")));
                return Err(e);
            }
        };

        let result = if response.status() == StatusCode::CREATED {
            self.notifier.notify(Notification::success("Note created!"));
            Ok(())
        } else {
            self.notifier
                .notify(Notification::error("Failed to create note."));
            Err(response.server_error().into())
        };

        // Fetch failures are already reported by load_notes
        let _ = self.load_notes().await;
        result
    }

    /// Delete a note; only 204 counts as deleted
    pub async fn delete_note(&mut self, id: i64) -> Result<(), ClientError> {
        let response = match self.client.delete_note(id).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, id, "Delete note request failed");
                self.notifier
                    .notify(Notification::error(format!("Failed to delete note: {e}")));
                return Err(e);
            }
        };

        let result = if response.status() == StatusCode::NO_CONTENT {
            self.notifier.notify(Notification::success("Note deleted!"));
            Ok(())
        } else {
            self.notifier
                .notify(Notification::error("Failed to delete note."));
            Err(response.server_error().into())
        };

        let _ = self.load_notes().await;
        result
    }
}
