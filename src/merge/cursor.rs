use crate::core::coordinate::GenomicCoordinate;
use crate::core::record::VariantRecord;

/// A forward-only cursor over a record stream.
///
/// Holds the current record so it can be inspected before it is consumed.
/// `peek` returns `None` exactly when the stream is exhausted.
pub struct RecordCursor<I> {
    inner: I,
    current: Option<VariantRecord>,
}

impl<I, E> RecordCursor<I>
where
    I: Iterator<Item = Result<VariantRecord, E>>,
{
    /// Build a cursor positioned on the first record.
    ///
    /// # Errors
    ///
    /// Returns the stream's error if the first record cannot be read.
    pub fn new(mut inner: I) -> Result<Self, E> {
        let current = inner.next().transpose()?;
        Ok(Self { inner, current })
    }

    #[must_use]
    pub fn peek(&self) -> Option<&VariantRecord> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn peek_coordinate(&self) -> Option<&GenomicCoordinate> {
        self.current.as_ref().map(VariantRecord::coordinate)
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Take the current record and move to the next one.
    ///
    /// # Errors
    ///
    /// Returns the stream's error if the next record cannot be read. The taken
    /// record is lost in that case; errors are fatal to the merge.
    pub fn advance(&mut self) -> Result<Option<VariantRecord>, E> {
        let next = self.inner.next().transpose()?;
        Ok(std::mem::replace(&mut self.current, next))
    }
}
