//! Error facility for Boxstash
//!
//! Every layer reports failures as an [`ExError`]: a stable [`ExErrorKind`]
//! classification plus optional operation, entity and message context.

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and external API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Client errors
    /// A required identifying or payload field is missing
    InvalidData,
    /// A read matched no row
    NotFound,

    // Persistence
    /// An update matched zero rows
    NoRowsUpdated,
    /// A storage-engine constraint (unique, foreign key, not null) failed
    ConstraintViolation,
    Persistence,
    Serialization,

    // Ambient
    Config,
    Io,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidData => "ERR_INVALID_DATA",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::NoRowsUpdated => "ERR_NO_ROWS_UPDATED",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the failure is attributable to the caller's request
    pub fn is_client_error(&self) -> bool {
        matches!(self, ExErrorKind::InvalidData | ExErrorKind::NotFound)
    }
}

/// Canonical structured error type
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<&'static str>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the entity type the error concerns ("user", "box", ...)
    pub fn with_entity(mut self, entity: &'static str) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
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

    /// Get the entity type, if any
    pub fn entity(&self) -> Option<&'static str> {
        self.entity
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Whether the failure is attributable to the caller's request
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }

    /// Render the `{"message": ...}` body used for API error responses
    pub fn to_json_message(&self) -> serde_json::Value {
        let message = if self.message.is_empty() {
            default_message(self.kind).to_string()
        } else {
            self.message.clone()
        };
        serde_json::json!({ "message": message })
    }
}

fn default_message(kind: ExErrorKind) -> &'static str {
    match kind {
        ExErrorKind::InvalidData => "Invalid or missing required data in request",
        ExErrorKind::NotFound => "Not Found",
        ExErrorKind::NoRowsUpdated => "No rows updated",
        _ => "Internal error",
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
        match (self.entity, &self.entity_id) {
            (Some(entity), Some(id)) => write!(f, " ({}: {})", entity, id)?,
            (Some(entity), None) => write!(f, " ({})", entity)?,
            (None, Some(id)) => write!(f, " (entity_id: {})", id)?,
            (None, None) => {}
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Required identifying or payload data is missing
pub fn invalid_data(entity: &'static str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidData)
        .with_entity(entity)
        .with_message(reason)
}

/// A lookup matched no row
pub fn not_found(entity: &'static str, key: impl ToString) -> ExError {
    let key = key.to_string();
    ExError::new(ExErrorKind::NotFound)
        .with_entity(entity)
        .with_message(format!("{} not found", entity))
        .with_entity_id(key)
}

/// An update matched zero rows
pub fn no_rows_updated(entity: &'static str, id: i64) -> ExError {
    ExError::new(ExErrorKind::NoRowsUpdated)
        .with_entity(entity)
        .with_entity_id(id)
        .with_message("No rows updated")
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
