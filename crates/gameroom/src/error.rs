use rvb_gameplay::Rejection;

/// Errors surfaced to command submitters.
///
/// Validation errors never reach the controller; legality errors come back
/// from it without mutation; `StorageUnavailable` and `TableClosed` are the
/// dispatcher's own. Stack traces and internal state never cross this
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "error", content = "detail", rename_all = "snake_case")]
pub enum TableError {
    Malformed(String),
    OutOfRange(String),
    NotYourTurn,
    IllegalAction(String),
    TableFull,
    TableInProgress,
    InsufficientChips,
    StorageUnavailable,
    TableClosed,
    Corrupt,
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(s) => write!(f, "malformed command: {}", s),
            Self::OutOfRange(s) => write!(f, "out of range: {}", s),
            Self::NotYourTurn => write!(f, "not your turn"),
            Self::IllegalAction(s) => write!(f, "illegal action: {}", s),
            Self::TableFull => write!(f, "table is full"),
            Self::TableInProgress => write!(f, "hand in progress"),
            Self::InsufficientChips => write!(f, "insufficient chips"),
            Self::StorageUnavailable => write!(f, "storage unavailable"),
            Self::TableClosed => write!(f, "table closed"),
            Self::Corrupt => write!(f, "table quarantined"),
        }
    }
}

impl std::error::Error for TableError {}

impl From<Rejection> for TableError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::NotYourTurn => Self::NotYourTurn,
            Rejection::TableFull => Self::TableFull,
            Rejection::HandInProgress => Self::TableInProgress,
            Rejection::ShortBuyIn { .. } | Rejection::EmptyStack => Self::InsufficientChips,
            Rejection::Invariant { .. } => Self::Corrupt,
            other => Self::IllegalAction(other.to_string()),
        }
    }
}
