/// Errors for user-supplied viewer inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("unknown shape '{0}'")]
    UnknownShape(String),
}
