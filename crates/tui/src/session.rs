use api_types::environment::EnvironmentDescriptor;

use crate::client::RequestOutcome;

/// Why a bootstrap attempt failed, surfaced to the renderer as a status
/// line. `Failed` is terminal for the mount; a reload re-mounts at
/// `NotLoaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unauthorized,
    Server(u16),
    Unreachable,
}

impl FailureKind {
    pub fn label(self) -> String {
        match self {
            Self::Unauthorized => "environment fetch rejected (unauthorized)".to_string(),
            Self::Server(code) => format!("environment fetch failed (server error {code})"),
            Self::Unreachable => "environment fetch failed (server unreachable)".to_string(),
        }
    }
}

/// Gates the navigation shell on a successful environment fetch.
///
/// `NotLoaded -> Loading -> Loaded` or `NotLoaded -> Loading -> Failed`;
/// both end states are terminal until the next mount.
#[derive(Debug, Default)]
pub enum Bootstrap {
    #[default]
    NotLoaded,
    Loading,
    Loaded(EnvironmentDescriptor),
    Failed(FailureKind),
}

impl Bootstrap {
    /// Enters `Loading`. Only meaningful from `NotLoaded`; returns whether
    /// the caller should issue the environment request.
    pub fn begin(&mut self) -> bool {
        if matches!(self, Self::NotLoaded) {
            *self = Self::Loading;
            return true;
        }
        false
    }

    /// Re-mounts the flow (page reload / logout).
    pub fn reset(&mut self) {
        *self = Self::NotLoaded;
    }

    /// Applies the classified outcome of the environment request. Outcomes
    /// arriving outside `Loading` are dropped.
    pub fn apply(&mut self, outcome: RequestOutcome<EnvironmentDescriptor>) {
        if !matches!(self, Self::Loading) {
            return;
        }
        *self = match outcome {
            RequestOutcome::Success(env) => {
                tracing::info!(
                    accounts = env.account_list.len(),
                    categories = env.category_list.len(),
                    "environment loaded"
                );
                Self::Loaded(env)
            }
            RequestOutcome::Unauthorized => Self::Failed(FailureKind::Unauthorized),
            RequestOutcome::ServerError(code) => Self::Failed(FailureKind::Server(code)),
            RequestOutcome::Unreachable => Self::Failed(FailureKind::Unreachable),
        };
        if let Self::Failed(kind) = self {
            tracing::warn!("bootstrap failed: {}", kind.label());
        }
    }

    /// The render gate: the navigation shell is visible only while this
    /// returns `Some`.
    pub fn environment(&self) -> Option<&EnvironmentDescriptor> {
        match self {
            Self::Loaded(env) => Some(env),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            Self::Failed(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_opens_the_render_gate() {
        let mut bootstrap = Bootstrap::default();
        assert!(bootstrap.begin());
        assert!(bootstrap.environment().is_none());

        bootstrap.apply(RequestOutcome::Success(EnvironmentDescriptor::default()));
        assert!(bootstrap.environment().is_some());
    }

    #[test]
    fn server_error_lands_in_failed_and_gate_stays_shut() {
        let mut bootstrap = Bootstrap::default();
        bootstrap.begin();
        bootstrap.apply(RequestOutcome::ServerError(500));

        assert!(bootstrap.environment().is_none());
        assert_eq!(bootstrap.failure(), Some(FailureKind::Server(500)));
    }

    #[test]
    fn failed_is_terminal_for_the_mount() {
        let mut bootstrap = Bootstrap::default();
        bootstrap.begin();
        bootstrap.apply(RequestOutcome::Unreachable);

        // A late or duplicate outcome must not resurrect the mount.
        bootstrap.apply(RequestOutcome::Success(EnvironmentDescriptor::default()));
        assert!(bootstrap.environment().is_none());
        assert!(!bootstrap.begin());
    }

    #[test]
    fn outcomes_outside_loading_are_dropped() {
        let mut bootstrap = Bootstrap::default();
        bootstrap.apply(RequestOutcome::Success(EnvironmentDescriptor::default()));
        assert!(bootstrap.environment().is_none());
    }

    #[test]
    fn reset_allows_a_fresh_mount() {
        let mut bootstrap = Bootstrap::default();
        bootstrap.begin();
        bootstrap.apply(RequestOutcome::ServerError(502));

        bootstrap.reset();
        assert!(bootstrap.begin());
        bootstrap.apply(RequestOutcome::Success(EnvironmentDescriptor::default()));
        assert!(bootstrap.environment().is_some());
    }
}
