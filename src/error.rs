//! Error types.
//!
//! Every variant is recoverable: the rejected operation leaves state as it
//! was, and the `Display` text is the notice shown to the user.

/// A placement, quantity or form constraint that rejected an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("Cannot place {name}: not enough contiguous {height}U space.")]
    InsufficientSpace { name: String, height: u32 },

    #[error("Cannot move equipment there: not enough contiguous free U space.")]
    MoveBlocked,

    #[error("Swap cannot be done due to height/space constraints.")]
    SwapBlocked,

    #[error("No remaining cable quantity for this item.")]
    CableExhausted,

    #[error("Cannot resize {name} to {height}U: it no longer fits at U{start_u}.")]
    ResizeBlocked {
        name: String,
        height: u32,
        start_u: u32,
    },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Unknown {entity}: {id}")]
    UnknownEntity { entity: &'static str, id: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RackError {
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    /// The detail is logged; the notice is fixed.
    #[error("Invalid JSON file.")]
    MalformedInput(String),
}

impl RackError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RackError::Validation(_))
    }

    /// The user-visible notice text.
    pub fn notice(&self) -> String {
        self.to_string()
    }
}

pub type RackResult<T> = Result<T, RackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text() {
        let err = RackError::from(ValidationFailure::InsufficientSpace {
            name: "Core Switch".to_string(),
            height: 2,
        });
        assert!(err.is_validation());
        assert_eq!(
            err.notice(),
            "Cannot place Core Switch: not enough contiguous 2U space."
        );

        let err = RackError::MalformedInput("missing equipments".to_string());
        assert!(!err.is_validation());
        assert_eq!(err.notice(), "Invalid JSON file.");
    }
}
