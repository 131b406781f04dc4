use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] capsift_core::ValidationError),

    #[error(transparent)]
    Source(#[from] capsift_core::SourceError),

    #[error(transparent)]
    Discovery(#[from] capsift_core::DiscoveryError),

    #[error(transparent)]
    Universe(#[from] capsift_core::UniverseError),

    #[error(transparent)]
    Sink(#[from] capsift_core::SinkError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Source(_) => 3,
            Self::Discovery(_) => 4,
            Self::Universe(_) => 5,
            Self::Sink(_) => 6,
            Self::Io(_) => 10,
        }
    }
}
