use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("{app} can only be installed on {supported}, but this system is {distro}")]
    DistroOnly {
        app: &'static str,
        distro: String,
        supported: &'static str,
    },

    #[error("Unsupported architecture: {0}")]
    UnsupportedArchitecture(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InstallError {
    /// Domain errors mean the request cannot work here, as opposed to a
    /// failure while trying.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            InstallError::DistroOnly { .. } | InstallError::UnsupportedArchitecture(_)
        )
    }
}
