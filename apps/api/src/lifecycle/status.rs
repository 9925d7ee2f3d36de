//! The request/quote state machines. Handlers and SQL guards both defer to
//! `can_transition_to` — the UI is expected not to offer disallowed actions,
//! but this module is the authority.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Status of a `ServiceRequest`.
///
/// `draft → active → {in_progress, cancelled}`,
/// `in_progress → {completed, cancelled}`; `completed` and `cancelled`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Draft,
    Active,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Draft => "draft",
            RequestStatus::Active => "active",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(RequestStatus::Draft),
            "active" => Ok(RequestStatus::Active),
            "in_progress" => Ok(RequestStatus::InProgress),
            "completed" => Ok(RequestStatus::Completed),
            "cancelled" => Ok(RequestStatus::Cancelled),
            other => Err(anyhow!("unknown request status '{other}'")),
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Cancelled)
    }

    pub const fn can_transition_to(self, to: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, to),
            (Draft, Active)
                | (Active, InProgress)
                | (Active, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }

    /// Rejects the transition as a 422 with the offending pair named.
    pub fn ensure_transition(self, to: RequestStatus) -> Result<(), AppError> {
        if self.can_transition_to(to) {
            Ok(())
        } else {
            Err(AppError::UnprocessableEntity(format!(
                "Illegal request transition {} -> {}",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

/// Status of a `Quote`. At most one quote per request may hold `Accepted`;
/// the accept operation enforces this with a guarded compare-and-swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Pending,
    Accepted,
    Rejected,
}

impl QuoteStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(QuoteStatus::Pending),
            "accepted" => Ok(QuoteStatus::Accepted),
            "rejected" => Ok(QuoteStatus::Rejected),
            other => Err(anyhow!("unknown quote status '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RequestStatus::*;

    #[test]
    fn test_legal_transitions() {
        assert!(Draft.can_transition_to(Active));
        assert!(Active.can_transition_to(InProgress));
        assert!(Active.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));
    }

    #[test]
    fn test_draft_cannot_skip_ahead() {
        assert!(!Draft.can_transition_to(InProgress));
        assert!(!Draft.can_transition_to(Completed));
        assert!(!Draft.can_transition_to(Cancelled));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for to in [Draft, Active, InProgress, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(to));
            assert!(!Cancelled.can_transition_to(to));
        }
    }

    #[test]
    fn test_no_backwards_transitions() {
        assert!(!Active.can_transition_to(Draft));
        assert!(!InProgress.can_transition_to(Active));
        assert!(!InProgress.can_transition_to(Draft));
    }

    #[test]
    fn test_active_cannot_complete_directly() {
        assert!(!Active.can_transition_to(Completed));
    }

    #[test]
    fn test_terminal_flags() {
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Draft.is_terminal());
        assert!(!Active.is_terminal());
        assert!(!InProgress.is_terminal());
    }

    #[test]
    fn test_ensure_transition_error_names_pair() {
        let err = Cancelled.ensure_transition(Active).unwrap_err();
        assert!(err.to_string().contains("cancelled -> active"));
    }

    #[test]
    fn test_round_trip_wire_strings() {
        for status in [Draft, Active, InProgress, Completed, Cancelled] {
            assert_eq!(RequestStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(RequestStatus::parse("archived").is_err());
    }

    #[test]
    fn test_quote_status_round_trip() {
        for status in [QuoteStatus::Pending, QuoteStatus::Accepted, QuoteStatus::Rejected] {
            assert_eq!(QuoteStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(QuoteStatus::parse("withdrawn").is_err());
    }

    #[test]
    fn test_happy_path_walk() {
        // draft → active → in_progress → completed, the full quoted flow.
        let walk = [Draft, Active, InProgress, Completed];
        for pair in walk.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]));
        }
    }
}
