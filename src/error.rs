use thiserror::Error;

/// Error returned by [`crate::PrefixSumIndex`] operations.
///
/// A rejected call never mutates the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("position {position} is out of range {min}..={max}")]
    OutOfRange {
        position: usize,
        min: usize,
        max: usize,
    },
}

impl IndexError {
    pub(crate) fn check(position: usize, min: usize, max: usize) -> Result<(), Self> {
        if position < min || position > max {
            fwarn!(position, min, max, "rejected out-of-range position");
            return Err(Self::OutOfRange { position, min, max });
        }
        Ok(())
    }
}
