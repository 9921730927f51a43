/// Visit state definitions for tracking crawl progress
///
/// A page moves `Unvisited -> Visiting -> {Recorded, Skipped} -> {Expanded, Pruned}`.
/// A page can also go straight from `Unvisited` to `Pruned` when it lies
/// beyond the maximum depth.
use std::fmt;

/// Represents the current state of a page visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitState {
    // ===== Active States =====
    /// Page is known but has not been claimed in the visited set
    Unvisited,

    /// Page has been claimed and its content is being fetched
    Visiting,

    // ===== Content Outcome States =====
    /// Page passed the content gate and a row was written
    Recorded,

    /// Page had no qualifying content, or its row could not be written
    Skipped,

    // ===== Terminal States =====
    /// Page links were extracted and queued for the next depth
    Expanded,

    /// Page was not expanded (beyond max depth, or its HTML fetch failed)
    Pruned,
}

impl VisitState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expanded | Self::Pruned)
    }

    /// Checks if a transition from this state to another is valid
    pub fn can_transition_to(&self, next: VisitState) -> bool {
        use VisitState::*;

        matches!(
            (self, next),
            (Unvisited, Visiting)
                | (Unvisited, Pruned)
                | (Visiting, Recorded)
                | (Visiting, Skipped)
                | (Recorded, Expanded)
                | (Recorded, Pruned)
                | (Skipped, Expanded)
                | (Skipped, Pruned)
        )
    }

    /// Returns a short lowercase label for log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unvisited => "unvisited",
            Self::Visiting => "visiting",
            Self::Recorded => "recorded",
            Self::Skipped => "skipped",
            Self::Expanded => "expanded",
            Self::Pruned => "pruned",
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
