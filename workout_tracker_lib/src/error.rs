/// Rejected workout input. Nothing is constructed and nothing reaches the
/// ledger; the message is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} has to be a number")]
    NotFinite(&'static str),
    #[error("{0} has to be a positive number")]
    NotPositive(&'static str),
}
