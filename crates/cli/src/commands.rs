//! CLI commands

use anyhow::Result;
use clap::Subcommand;
use notes_frontend_common::{
    AppContext, AuthorizationState, CredentialStore, GuardOptions, GuardOutcome, LoginForm,
    RegisterForm, SessionConfig, SessionGuard, TokenClaims,
};
use std::future::Future;
use std::io::Write;
use std::process::ExitCode;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::output;

/// Printed when a protected command is refused
pub const LOGIN_HINT: &str = "Session expired or missing, run `notes login`";

/// Printed while the session check is waiting on the backend
pub const PENDING_MESSAGE: &str = "Checking session...";

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session tokens
    Login {
        #[arg(long)]
        email: String,

        /// Read from NOTES_PASSWORD when omitted
        #[arg(long, env = "NOTES_PASSWORD", hide_env_values = true)]
        password: String,

        /// Remember this session
        #[arg(long)]
        remember_me: bool,
    },

    /// Create an account
    Register {
        #[arg(long)]
        email: String,

        /// Read from NOTES_PASSWORD when omitted
        #[arg(long, env = "NOTES_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        /// Accept the terms and conditions
        #[arg(long)]
        accept_terms: bool,
    },

    /// Forget the stored session
    Logout,

    /// Check the stored session, refreshing it if needed
    Status,

    /// List notes
    List,

    /// Create a note
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,
    },

    /// Delete a note
    Delete {
        /// Note id
        id: i64,
    },
}

impl Commands {
    pub async fn execute(self, ctx: &AppContext, options: GuardOptions) -> Result<ExitCode> {
        match self {
            Self::Login {
                email,
                password,
                remember_me,
            } => {
                let form = LoginForm {
                    email,
                    password,
                    remember_me,
                };
                Ok(exit_code(ctx.auth().login(&form).await.is_ok()))
            }
            Self::Register {
                email,
                password,
                first_name,
                last_name,
                accept_terms,
            } => {
                let form = RegisterForm {
                    email,
                    password,
                    first_name,
                    last_name,
                    accept_terms,
                };
                let result = ctx.auth().register(&form).await;
                if result.is_ok() {
                    println!("Run `notes login` to sign in.");
                }
                Ok(exit_code(result.is_ok()))
            }
            Self::Logout => {
                ctx.auth().logout()?;
                println!("Logged out.");
                Ok(ExitCode::SUCCESS)
            }
            Self::Status => {
                let guard = ctx.guard(options);
                protected(&guard, &mut std::io::stderr(), || async move {
                    println!("Session: authorized");
                    if let Some(claims) = ctx
                        .store()
                        .get(SessionConfig::ACCESS_KEY)
                        .and_then(|access| TokenClaims::decode_unverified(&access).ok())
                    {
                        output::render_claims(&mut std::io::stdout().lock(), &claims)?;
                    }
                    if ctx.store().get(SessionConfig::REMEMBER_ME_KEY).is_some() {
                        println!("remembered: yes");
                    }
                    Ok(ExitCode::SUCCESS)
                })
                .await
            }
            Self::List => {
                let guard = ctx.guard(options);
                let mut page = ctx.notes_page();
                let page = &mut page;
                protected(&guard, &mut std::io::stderr(), || async move {
                    match page.load_notes().await {
                        Ok(notes) => {
                            output::render_notes(&mut std::io::stdout().lock(), notes)?;
                            Ok(ExitCode::SUCCESS)
                        }
                        Err(_) => Ok(ExitCode::FAILURE),
                    }
                })
                .await
            }
            Self::Create { title, content } => {
                let guard = ctx.guard(options);
                let mut page = ctx.notes_page();
                let page = &mut page;
                protected(&guard, &mut std::io::stderr(), || async move {
                    Ok(exit_code(page.create_note(&title, &content).await.is_ok()))
                })
                .await
            }
            Self::Delete { id } => {
                let guard = ctx.guard(options);
                let mut page = ctx.notes_page();
                let page = &mut page;
                protected(&guard, &mut std::io::stderr(), || async move {
                    Ok(exit_code(page.delete_note(id).await.is_ok()))
                })
                .await
            }
        }
    }
}

/// Run `view` behind the session guard
///
/// Status lines go to `status`: the pending message when the session check
/// has to wait, and the login hint on redirect.
async fn protected<F, Fut>(
    guard: &SessionGuard,
    status: &mut dyn Write,
    view: F,
) -> Result<ExitCode>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<ExitCode>>,
{
    let mut states = guard.subscribe();
    let outcome = guard.protect(view);
    tokio::pin!(outcome);

    let outcome = tokio::select! {
        biased;
        outcome = &mut outcome => outcome,
        () = show_pending(&mut states, status) => outcome.await,
    };

    match outcome {
        GuardOutcome::Admitted(result) => result,
        GuardOutcome::Redirect(route) => {
            debug!(route, "Protected command refused");
            let _ = writeln!(status, "{LOGIN_HINT}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Print the pending message once if the guard is seen unsettled
///
/// Never completes once the guard has settled without printing.
async fn show_pending(states: &mut watch::Receiver<AuthorizationState>, out: &mut dyn Write) {
    while states.changed().await.is_ok() {
        if !states.borrow_and_update().is_settled() {
            let _ = writeln!(out, "{PENDING_MESSAGE}");
            return;
        }
    }
    std::future::pending::<()>().await;
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        info!("Command completed successfully");
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
