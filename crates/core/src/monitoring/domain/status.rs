use std::time::Duration;

/// Driver safety status. Exactly one is active per evaluated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Lens covered or image too uniform to analyse.
    Blocked,
    /// No face in view.
    Absent,
    /// A face is visible but shows neither blinks nor movement.
    Static,
    Attentive,
}

impl Status {
    pub const ALL: &[Status] = &[
        Status::Blocked,
        Status::Absent,
        Status::Static,
        Status::Attentive,
    ];

    pub fn is_alertable(&self) -> bool {
        !matches!(self, Status::Attentive)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Blocked => write!(f, "blocked"),
            Status::Absent => write!(f, "absent"),
            Status::Static => write!(f, "static"),
            Status::Attentive => write!(f, "attentive"),
        }
    }
}

/// Status of one frame plus when that status began.
///
/// `since` is set for every status except `Attentive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub status: Status,
    pub since: Option<Duration>,
}
