//! Notes API client methods

use super::{ApiResponse, ClientError, NotesClient};
use crate::types::NoteCreateRequest;
use reqwest::Method;

pub const NOTES_LIST_PATH: &str = "/api/notes/all/";
pub const NOTES_CREATE_PATH: &str = "/api/notes/";

/// Path of the delete endpoint for one note
pub fn note_delete_path(id: i64) -> String {
    format!("/api/notes/delete/{id}/")
}

impl NotesClient {
    /// List the caller's notes
    pub async fn list_notes(&self) -> Result<ApiResponse, ClientError> {
        let request = self.request(Method::GET, NOTES_LIST_PATH);
        self.send(request).await
    }

    /// Create a note
    pub async fn create_note(
        &self,
        request: &NoteCreateRequest,
    ) -> Result<ApiResponse, ClientError> {
        let req = self.request(Method::POST, NOTES_CREATE_PATH).json(request);
        self.send(req).await
    }

    /// Delete a note by id
    pub async fn delete_note(&self, id: i64) -> Result<ApiResponse, ClientError> {
        let request = self.request(Method::DELETE, &note_delete_path(id));
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_path_keeps_trailing_slash() {
        assert_eq!(note_delete_path(42), "/api/notes/delete/42/");
    }
}
