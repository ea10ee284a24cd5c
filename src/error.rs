use core::fmt;

/// Failures while loading assets at session start
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    MissingImage { name: String },
    MissingSound { name: String },
    InvalidImage { name: String, reason: String },
}

impl AssetError {
    /// Logical asset name the error refers to
    pub fn asset_name(&self) -> &str {
        match self {
            Self::MissingImage { name }
            | Self::MissingSound { name }
            | Self::InvalidImage { name, .. } => name,
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingImage { name } => write!(f, "could not load image \"{name}\""),
            Self::MissingSound { name } => write!(f, "could not load sound \"{name}\""),
            Self::InvalidImage { name, reason } => {
                write!(f, "image \"{name}\" is unusable: {reason}")
            }
        }
    }
}

impl std::error::Error for AssetError {}
