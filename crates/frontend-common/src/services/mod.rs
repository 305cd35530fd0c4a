pub mod auth;
pub mod notes;

pub use auth::{
    AuthFlowError, AuthService, LoginForm, RegisterForm, ValidationError, username_from_email,
};
pub use notes::NotesPage;
