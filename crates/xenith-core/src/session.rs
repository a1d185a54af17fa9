//! Analysis session phases
//!
//! The dashboard reveals results in a fixed order. Each phase is entered only
//! once the stage producing its output has completed:
//!
//! ```text
//! Idle -> Analyzing -> SummaryShown -> ChartsShown -> InsightsShown
//! ```
//!
//! Any phase other than `Idle` may reset to `Idle`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::SessionError;

/// Unique session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Ulid);

impl SessionId {
    /// Generate new session ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Phase of an analysis session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Aggregation running
    Analyzing,
    /// Rankings and summaries available
    SummaryShown,
    /// Matrix, trend and segments available
    ChartsShown,
    /// Insights available; the run is complete
    InsightsShown,
}

impl AnalysisPhase {
    /// All phases in sequence order
    pub const ALL: [AnalysisPhase; 5] = [
        Self::Idle,
        Self::Analyzing,
        Self::SummaryShown,
        Self::ChartsShown,
        Self::InsightsShown,
    ];

    /// Phase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Analyzing => "analyzing",
            Self::SummaryShown => "summary-shown",
            Self::ChartsShown => "charts-shown",
            Self::InsightsShown => "insights-shown",
        }
    }
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates a phase transition
pub fn validate_transition(from: AnalysisPhase, to: AnalysisPhase) -> Result<(), SessionError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(SessionError::IllegalTransition { from, to })
    }
}

/// Phases reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: AnalysisPhase) -> Vec<AnalysisPhase> {
    use AnalysisPhase::*;
    match from {
        Idle => vec![Analyzing],
        Analyzing => vec![SummaryShown, Idle],
        SummaryShown => vec![ChartsShown, Idle],
        ChartsShown => vec![InsightsShown, Idle],
        InsightsShown => vec![Idle],
    }
}

/// One recorded transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// Phase left
    pub from: AnalysisPhase,
    /// Phase entered
    pub to: AnalysisPhase,
    /// When the transition happened
    pub at: DateTime<Utc>,
}

/// Analysis session with its transition history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSession {
    id: SessionId,
    phase: AnalysisPhase,
    started_at: DateTime<Utc>,
    history: Vec<PhaseTransition>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    /// New idle session
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            phase: AnalysisPhase::Idle,
            started_at: Utc::now(),
            history: Vec::new(),
        }
    }

    /// Session id
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    /// Creation time
    #[inline]
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Transitions so far, oldest first
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[PhaseTransition] {
        &self.history
    }

    /// Whether the last phase has been reached
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == AnalysisPhase::InsightsShown
    }

    /// Move to `to`; the phase is unchanged on error
    pub fn advance(&mut self, to: AnalysisPhase) -> Result<(), SessionError> {
        validate_transition(self.phase, to)?;
        let transition = PhaseTransition {
            from: self.phase,
            to,
            at: Utc::now(),
        };
        tracing::debug!("Session {}: {} -> {}", self.id, transition.from, to);
        self.history.push(transition);
        self.phase = to;
        Ok(())
    }

    /// Return to `Idle`; a no-op when already idle
    pub fn reset(&mut self) {
        if self.phase != AnalysisPhase::Idle {
            // every non-idle phase may reset
            let _ = self.advance(AnalysisPhase::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_sequence() {
        let mut session = AnalysisSession::new();
        for phase in &AnalysisPhase::ALL[1..] {
            session.advance(*phase).unwrap();
        }
        assert!(session.is_complete());
        assert_eq!(session.history().len(), 4);
        assert!(session.history().windows(2).all(|w| w[0].at <= w[1].at));
    }

    #[test]
    fn skipping_a_phase_is_rejected() {
        let mut session = AnalysisSession::new();
        session.advance(AnalysisPhase::Analyzing).unwrap();
        let err = session.advance(AnalysisPhase::ChartsShown).unwrap_err();
        assert_eq!(
            err,
            SessionError::IllegalTransition {
                from: AnalysisPhase::Analyzing,
                to: AnalysisPhase::ChartsShown
            }
        );
        assert_eq!(session.phase(), AnalysisPhase::Analyzing);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn reset_records_transition() {
        let mut session = AnalysisSession::new();
        session.reset();
        assert!(session.history().is_empty());

        session.advance(AnalysisPhase::Analyzing).unwrap();
        session.reset();
        assert_eq!(session.phase(), AnalysisPhase::Idle);
        assert_eq!(session.history().last().map(|t| t.to), Some(AnalysisPhase::Idle));
    }

    #[test]
    fn phase_names() {
        assert_eq!(AnalysisPhase::SummaryShown.to_string(), "summary-shown");
        assert_eq!(
            serde_json::to_string(&AnalysisPhase::InsightsShown).unwrap(),
            "\"insights-shown\""
        );
    }
}
