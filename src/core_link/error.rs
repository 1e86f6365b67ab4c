use thiserror::Error;

/// Checkable failures reported by this crate.
///
/// Heap exhaustion on the raising path is deliberately absent: it never comes
/// back to the caller as a value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrtError {
    /// `install` was called after a process heap had already been set.
    #[error("process heap is already installed")]
    HeapAlreadyInstalled,

    /// The destination slice cannot hold the requested number of units.
    #[error("destination holds {capacity} units but {requested} were requested")]
    DestinationTooSmall { requested: usize, capacity: usize },

    /// The source slice has fewer units than were requested.
    #[error("source holds {available} units but {requested} were requested")]
    SourceTooShort { requested: usize, available: usize },

    /// No zero unit was found inside the scanned slice.
    #[error("no terminator within {scanned} units")]
    Unterminated { scanned: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_sizes() {
        let err = CrtError::DestinationTooSmall { requested: 8, capacity: 4 };
        assert_eq!(err.to_string(), "destination holds 4 units but 8 were requested");
        assert_eq!(
            CrtError::Unterminated { scanned: 3 }.to_string(),
            "no terminator within 3 units"
        );
    }
}
