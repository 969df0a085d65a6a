use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{count} option(s) failed validation")]
    InvalidOptions { count: usize },

    #[error(transparent)]
    Options(#[from] ratioplot::Error),
}
