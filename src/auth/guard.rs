//! Presentation boundary for decisions
//!
//! UI guards own no policy; they only map a [`Decision`] onto what to show.

use serde::Serialize;

use crate::auth::rbac::Decision;

/// What a guarded view should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardOutcome {
    /// Show the guarded content
    Render,
    /// Show the content plus a non-blocking approval notice
    RenderWithApprovalNotice,
    /// Denied, show the caller-supplied fallback
    Fallback,
    /// Denied, render nothing
    Hidden,
}

impl GuardOutcome {
    pub fn for_decision(decision: &Decision, has_fallback: bool) -> Self {
        match (decision.has_access, decision.requires_approval) {
            (true, true) => GuardOutcome::RenderWithApprovalNotice,
            (true, false) => GuardOutcome::Render,
            (false, _) if has_fallback => GuardOutcome::Fallback,
            (false, _) => GuardOutcome::Hidden,
        }
    }

    pub fn shows_content(&self) -> bool {
        matches!(
            self,
            GuardOutcome::Render | GuardOutcome::RenderWithApprovalNotice
        )
    }
}
