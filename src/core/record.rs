use thiserror::Error;

use crate::core::coordinate::GenomicCoordinate;

/// CHROM, POS, ID, REF, ALT, QUAL, FILTER, INFO
pub const MANDATORY_COLUMNS: usize = 8;

/// Mandatory columns plus FORMAT
pub const FIXED_COLUMNS: usize = MANDATORY_COLUMNS + 1;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected at least {MANDATORY_COLUMNS} tab-separated columns, found {0}")]
    TooFewColumns(usize),

    #[error("invalid position '{0}'")]
    InvalidPosition(String),

    #[error("sample column {sample} has {found} subfields but FORMAT declares {declared}")]
    FieldCountMismatch {
        sample: usize,
        found: usize,
        declared: usize,
    },
}

/// One data line of a VCF stream.
///
/// The line text is kept verbatim; only the coordinate is parsed eagerly.
#[derive(Debug, Clone)]
pub struct VariantRecord {
    line: String,
    coordinate: GenomicCoordinate,
}

impl VariantRecord {
    /// Parse a data line. A trailing `\n` or `\r\n` is removed.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::TooFewColumns` if the line has fewer than eight
    /// columns, or `RecordError::InvalidPosition` if POS is not an integer.
    pub fn parse(line: impl Into<String>) -> Result<Self, RecordError> {
        let mut line = line.into();
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        let column_count = line.split('\t').count();
        if column_count < MANDATORY_COLUMNS {
            return Err(RecordError::TooFewColumns(column_count));
        }

        let mut columns = line.splitn(3, '\t');
        let chromosome = columns.next().unwrap_or_default();
        let pos = columns.next().unwrap_or_default();
        let position = pos
            .parse::<u64>()
            .map_err(|_| RecordError::InvalidPosition(pos.to_string()))?;
        let coordinate = GenomicCoordinate::new(chromosome, position);

        Ok(Self { line, coordinate })
    }

    #[must_use]
    pub fn coordinate(&self) -> &GenomicCoordinate {
        &self.coordinate
    }

    #[must_use]
    pub fn chromosome(&self) -> &str {
        self.coordinate.chromosome()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.line
    }

    #[must_use]
    pub fn into_line(self) -> String {
        self.line
    }

    pub fn columns(&self) -> std::str::Split<'_, char> {
        self.line.split('\t')
    }

    /// The first eight columns, tab-joined, exactly as they appear in the line.
    #[must_use]
    pub fn mandatory_columns(&self) -> &str {
        match self.line.match_indices('\t').nth(MANDATORY_COLUMNS - 1) {
            Some((end, _)) => &self.line[..end],
            None => &self.line,
        }
    }

    /// True when REF and ALT are each one base and ALT is a real allele.
    ///
    /// Mirrors `bcftools view -m2 -M2 -v snps`.
    #[must_use]
    pub fn is_biallelic_snp(&self) -> bool {
        let mut columns = self.columns().skip(3);
        let (Some(reference), Some(alternate)) = (columns.next(), columns.next()) else {
            return false;
        };
        is_base(reference) && is_base(alternate)
    }
}

fn is_base(allele: &str) -> bool {
    matches!(
        allele.as_bytes(),
        [b'A' | b'C' | b'G' | b'T' | b'a' | b'c' | b'g' | b't']
    )
}

/// A reference panel line: a coordinate that must be present in the output.
///
/// Any sample data on the line is ignored.
#[derive(Debug, Clone)]
pub struct SiteRecord(VariantRecord);

impl SiteRecord {
    #[must_use]
    pub fn new(record: VariantRecord) -> Self {
        Self(record)
    }

    #[must_use]
    pub fn coordinate(&self) -> &GenomicCoordinate {
        self.0.coordinate()
    }

    #[must_use]
    pub fn chromosome(&self) -> &str {
        self.0.chromosome()
    }

    #[must_use]
    pub fn mandatory_columns(&self) -> &str {
        self.0.mandatory_columns()
    }
}

impl From<VariantRecord> for SiteRecord {
    fn from(record: VariantRecord) -> Self {
        Self::new(record)
    }
}

/// Ordered FORMAT keys of a record, e.g. `GT:GQ:DP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    keys: Vec<String>,
}

impl FormatSpec {
    #[must_use]
    pub fn parse(format: &str) -> Self {
        Self {
            keys: format.split(':').map(str::to_string).collect(),
        }
    }

    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }
}
