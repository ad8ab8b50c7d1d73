//! Crate-wide error taxonomy.
//!
//! Only the two *fatal* kinds from spec §7 (`AllocationFailure`,
//! `IoFailure`) are represented as `Err` variants here. The remaining
//! kinds (`Mismatch`, `UserAbort`, `UnsafeZeroPage`, `UnsupportedOpcode`)
//! are non-fatal by design and are carried as data in [`crate::report`]
//! instead of being raised as errors.

use thiserror::Error;

/// Primary error type for the conformance harness.
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// The test-code arena could not be allocated with the requested shape.
    #[error("arena allocation failed: {0}")]
    Allocation(#[from] AllocationFailure),

    /// A reference-data file was missing, truncated, or otherwise unreadable.
    #[error("reference table I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A reference-data file was read in full but had the wrong size (P4).
    #[error("reference table {path} has size {actual}, expected exactly {expected} bytes")]
    ReferenceTableSizeMismatch {
        path: String,
        expected: usize,
        actual: usize,
    },
}

/// Reasons an [`crate::arena::Arena`] allocation can fail.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AllocationFailure {
    /// The requested size was odd or smaller than two pages (512 bytes).
    #[error("requested arena size {0} is not a multiple of 2 or is smaller than 512 bytes")]
    SizeNotAligned(usize),

    /// The host could not supply a block large enough to carry the
    /// alignment padding needed to guarantee a page-aligned `base`.
    #[error("out of memory while allocating a {0}-byte arena")]
    OutOfMemory(usize),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ConformanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_failure_displays_size() {
        let e = AllocationFailure::SizeNotAligned(100);
        assert!(e.to_string().contains("100"));
    }

    #[test]
    fn size_mismatch_displays_both_values() {
        let e = ConformanceError::ReferenceTableSizeMismatch {
            path: "adc_sbc_6502.dat".into(),
            expected: 524_288,
            actual: 12,
        };
        let msg = e.to_string();
        assert!(msg.contains("524288"));
        assert!(msg.contains("12"));
    }
}
