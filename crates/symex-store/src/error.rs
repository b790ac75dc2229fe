//! Error types for the element store

/// Errors raised by [`crate::ElementStore`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Index beyond the addressable slots
    #[error("index {index} out of bounds for {len} slots")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Addressable slots
        len: usize,
    },

    /// Operation needs a concrete length
    #[error("operation requires a concrete length, store length is {symbol}")]
    SymbolicLength {
        /// Name of the length symbol
        symbol: String,
    },

    /// Length bound exceeds the addressable slots
    #[error("inconsistent store: length may reach {required} but only {slots} slots exist")]
    Inconsistent {
        /// Addressable slots
        slots: usize,
        /// Slots the largest feasible length needs
        required: usize,
    },

    /// Symbolic length bounds admit no length
    #[error("empty length range: min {min} exceeds max {max}")]
    EmptyLengthRange {
        /// Lower bound
        min: usize,
        /// Upper bound
        max: usize,
    },

    /// Requested length outside the feasible range
    #[error("length {requested} outside feasible range {min}..={max}")]
    LengthOutOfRange {
        /// Length asked for
        requested: usize,
        /// Smallest feasible length
        min: usize,
        /// Largest feasible length
        max: usize,
    },
}
