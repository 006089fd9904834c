use thiserror::Error;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used for programmatic handling,
/// log assertions and the `err.code` log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Record source
    SourceUnavailable,
    SourceTimeout,
    SourceStatus,
    /// The expected data table or region marker is absent from the payload
    TableNotFound,

    // Rendering
    /// A delta does not carry a metric the renderer was configured to show
    MissingMetric,

    // Dispatch
    DispatchRejected,

    // Configuration
    InvalidConfig,
    UnknownValue,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::SourceUnavailable => "ERR_SOURCE_UNAVAILABLE",
            ExErrorKind::SourceTimeout => "ERR_SOURCE_TIMEOUT",
            ExErrorKind::SourceStatus => "ERR_SOURCE_STATUS",
            ExErrorKind::TableNotFound => "ERR_TABLE_NOT_FOUND",
            ExErrorKind::MissingMetric => "ERR_MISSING_METRIC",
            ExErrorKind::DispatchRejected => "ERR_DISPATCH_REJECTED",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::UnknownValue => "ERR_UNKNOWN_VALUE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional
/// context (operation, location, channel) for logs.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    location: Option<String>,
    channel_id: Option<u64>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            location: None,
            channel_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add location context
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add channel context
    pub fn with_channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the location context, if any
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Get the channel context, if any
    pub fn channel_id(&self) -> Option<u64> {
        self.channel_id
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(location) = &self.location {
            write!(f, " (location: {})", location)?;
        }
        if let Some(channel_id) = self.channel_id {
            write!(f, " (channel_id: {})", channel_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for casewatch operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaseWatchError {
    // ===== Source Errors =====
    /// Transport or payload failure while fetching the latest data
    #[error("Failed to fetch source data: {reason}")]
    SourceUnavailable { reason: String },

    /// Fetch did not complete in time
    #[error("Timed out after {after_secs}s whilst fetching source data")]
    SourceTimeout { after_secs: u64 },

    /// Source answered with a non-success status
    #[error("Non-success status {status} returned from source")]
    SourceStatus { status: u16 },

    /// Payload was fetched but the expected table could not be located
    #[error("Data table for region '{region}' not found in source payload")]
    TableNotFound { region: String },

    // ===== Render Errors =====
    /// A delta lacks a metric the renderer must display
    #[error("Delta for {location} has no value for metric {metric}")]
    MissingMetric { location: String, metric: String },

    // ===== Dispatch Errors =====
    /// Sink refused a message
    #[error("Sink rejected message for channel {channel_id}: {reason}")]
    DispatchRejected { channel_id: u64, reason: String },

    // ===== Configuration Errors =====
    /// Configuration failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A string value does not name any known variant
    #[error("Unknown {field} '{value}'")]
    UnknownValue { field: String, value: String },

    // ===== Generic Errors =====
    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from CaseWatchError to ExError
impl From<CaseWatchError> for ExError {
    fn from(err: CaseWatchError) -> Self {
        let message = err.to_string();
        match err {
            CaseWatchError::SourceUnavailable { .. } => {
                ExError::new(ExErrorKind::SourceUnavailable).with_message(message)
            }
            CaseWatchError::SourceTimeout { .. } => {
                ExError::new(ExErrorKind::SourceTimeout).with_message(message)
            }
            CaseWatchError::SourceStatus { .. } => {
                ExError::new(ExErrorKind::SourceStatus).with_message(message)
            }
            CaseWatchError::TableNotFound { .. } => {
                ExError::new(ExErrorKind::TableNotFound).with_message(message)
            }
            CaseWatchError::MissingMetric { location, .. } => {
                ExError::new(ExErrorKind::MissingMetric)
                    .with_location(location)
                    .with_message(message)
            }
            CaseWatchError::DispatchRejected { channel_id, .. } => {
                ExError::new(ExErrorKind::DispatchRejected)
                    .with_channel_id(channel_id)
                    .with_message(message)
            }
            CaseWatchError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }
            CaseWatchError::UnknownValue { .. } => {
                ExError::new(ExErrorKind::UnknownValue).with_message(message)
            }
            CaseWatchError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
