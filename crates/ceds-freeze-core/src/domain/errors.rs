use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FreezeResult<T> = Result<T, FreezeError>;

/// Error taxonomy for the freezing engine.
///
/// `Configuration` and `Internal` failures abort the whole run; every other
/// category is caught at the species-loop boundary and skips only the
/// species that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FreezeErrorCategory {
    Configuration,
    FileDiscovery,
    MalformedTable,
    Alignment,
    Io,
    Internal,
}

impl FreezeErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Configuration => 2,
            Self::FileDiscovery | Self::Io => 3,
            Self::MalformedTable | Self::Alignment => 4,
            Self::Internal => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Configuration => "ConfigurationError",
            Self::FileDiscovery => "FileDiscoveryError",
            Self::MalformedTable => "MalformedTableError",
            Self::Alignment => "AlignmentError",
            Self::Io => "IoError",
            Self::Internal => "InternalError",
        }
    }

    /// Whether a failure in this category is caught at the species loop
    /// instead of aborting the run.
    pub const fn is_species_recoverable(self) -> bool {
        matches!(
            self,
            Self::FileDiscovery | Self::MalformedTable | Self::Alignment | Self::Io
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreezeError {
    category: FreezeErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl FreezeError {
    pub fn new(
        category: FreezeErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn configuration(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FreezeErrorCategory::Configuration, placeholder, message)
    }

    pub fn file_discovery(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FreezeErrorCategory::FileDiscovery, placeholder, message)
    }

    pub fn malformed_table(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FreezeErrorCategory::MalformedTable, placeholder, message)
    }

    pub fn alignment(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FreezeErrorCategory::Alignment, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FreezeErrorCategory::Io, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FreezeErrorCategory::Internal, placeholder, message)
    }

    pub const fn category(&self) -> FreezeErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub const fn is_species_recoverable(&self) -> bool {
        self.category.is_species_recoverable()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }
}

impl Display for FreezeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.label(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for FreezeError {}
