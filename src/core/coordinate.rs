use std::cmp::Ordering;
use std::fmt;

/// Rank assigned to any chromosome label outside the fixed table.
pub const UNRANKED: u32 = 100;

/// Sort rank for a chromosome label.
///
/// Numeric labels rank as their own value; `X` and `XY` share 23, `Y` is 24
/// and `MT` is 26. Everything else (including `chr`-prefixed names) ranks
/// [`UNRANKED`] so it sorts after all standard chromosomes.
///
/// `X` and `XY` sharing a rank means records on the two contigs interleave by
/// position alone. That is the order callers are expected to sort by, so it
/// is kept as-is.
///
/// # Examples
///
/// ```
/// use homref_fill::core::coordinate::chromosome_rank;
///
/// assert_eq!(chromosome_rank("7"), 7);
/// assert_eq!(chromosome_rank("XY"), 23);
/// assert_eq!(chromosome_rank("chr7"), 100);
/// ```
#[must_use]
pub fn chromosome_rank(label: &str) -> u32 {
    if let Ok(n) = label.parse::<u32>() {
        return n;
    }
    match label {
        "X" | "XY" => 23,
        "Y" => 24,
        "MT" => 26,
        _ => UNRANKED,
    }
}

/// A `(chromosome, position)` pair ordered by `(rank, position)`.
///
/// Equality follows the ordering: two coordinates on different labels with the
/// same rank and position compare equal.
#[derive(Debug, Clone)]
pub struct GenomicCoordinate {
    chromosome: String,
    rank: u32,
    position: u64,
}

impl GenomicCoordinate {
    pub fn new(chromosome: impl Into<String>, position: u64) -> Self {
        let chromosome = chromosome.into();
        let rank = chromosome_rank(&chromosome);
        Self {
            chromosome,
            rank,
            position,
        }
    }

    #[must_use]
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    #[must_use]
    pub fn rank(&self) -> u32 {
        self.rank
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl Ord for GenomicCoordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.rank, self.position).cmp(&(other.rank, other.position))
    }
}

impl PartialOrd for GenomicCoordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GenomicCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GenomicCoordinate {}

impl fmt::Display for GenomicCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chromosome, self.position)
    }
}
