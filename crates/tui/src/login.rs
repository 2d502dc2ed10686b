use crate::client::RequestOutcome;

/// User choice offered by a blocking error notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryDecision {
    Retry,
    Logout,
    ReloadPage,
    Dismiss,
}

impl RecoveryDecision {
    pub fn label(self) -> &'static str {
        match self {
            Self::Retry => "Retry",
            Self::Logout => "Logout",
            Self::ReloadPage => "Reload",
            Self::Dismiss => "OK",
        }
    }
}

/// What submitting the settings-login form should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    /// Local validation failure; rendered inline, no request issued.
    SecretRequired,
    /// Validate the candidate secret against the backend.
    Validate { secret: String },
}

pub fn submit(secret: &str) -> SubmitAction {
    if secret.is_empty() {
        return SubmitAction::SecretRequired;
    }
    SubmitAction::Validate {
        secret: secret.to_string(),
    }
}

/// Blocking modal content. The flow does not proceed until the user picks
/// one of the offered decisions, in the order given here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub message: String,
    pub choices: Vec<RecoveryDecision>,
}

/// What the caller must do with a classified validation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEffect {
    /// Persist the candidate secret to session scope only, then navigate
    /// to the settings destination.
    EnterSettings,
    Prompt(Prompt),
}

pub fn on_outcome(outcome: &RequestOutcome<()>, server: &str) -> LoginEffect {
    match outcome {
        RequestOutcome::Success(()) => LoginEffect::EnterSettings,
        RequestOutcome::Unauthorized => LoginEffect::Prompt(Prompt {
            message: "Your credentials are invalid!".to_string(),
            choices: vec![RecoveryDecision::Dismiss],
        }),
        RequestOutcome::ServerError(code) => LoginEffect::Prompt(Prompt {
            message: format!(
                "Something went wrong while communicating with the backend (status {code})."
            ),
            choices: vec![RecoveryDecision::Logout, RecoveryDecision::ReloadPage],
        }),
        RequestOutcome::Unreachable => LoginEffect::Prompt(Prompt {
            message: format!(
                "libDrive could not communicate with the backend. Is {server} the correct address?"
            ),
            choices: vec![RecoveryDecision::Logout, RecoveryDecision::Retry],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_never_reaches_the_network() {
        assert_eq!(submit(""), SubmitAction::SecretRequired);
    }

    #[test]
    fn non_empty_secret_validates_the_candidate() {
        assert_eq!(
            submit("hunter2"),
            SubmitAction::Validate {
                secret: "hunter2".to_string()
            }
        );
    }

    #[test]
    fn success_enters_settings() {
        let effect = on_outcome(&RequestOutcome::Success(()), "http://host:9090");
        assert_eq!(effect, LoginEffect::EnterSettings);
    }

    #[test]
    fn unauthorized_offers_only_dismiss() {
        let LoginEffect::Prompt(prompt) =
            on_outcome(&RequestOutcome::Unauthorized, "http://host:9090")
        else {
            panic!("expected a prompt");
        };
        assert_eq!(prompt.choices, vec![RecoveryDecision::Dismiss]);
    }

    #[test]
    fn server_error_offers_logout_or_reload() {
        let LoginEffect::Prompt(prompt) =
            on_outcome(&RequestOutcome::ServerError(500), "http://host:9090")
        else {
            panic!("expected a prompt");
        };
        assert_eq!(
            prompt.choices,
            vec![RecoveryDecision::Logout, RecoveryDecision::ReloadPage]
        );
        assert!(prompt.message.contains("500"));
    }

    #[test]
    fn unreachable_offers_logout_or_retry_and_names_the_server() {
        let LoginEffect::Prompt(prompt) =
            on_outcome(&RequestOutcome::Unreachable, "http://host:9090")
        else {
            panic!("expected a prompt");
        };
        assert_eq!(
            prompt.choices,
            vec![RecoveryDecision::Logout, RecoveryDecision::Retry]
        );
        assert!(prompt.message.contains("http://host:9090"));
    }
}
