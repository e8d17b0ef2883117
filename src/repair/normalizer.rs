use serde::Serialize;

use crate::core::record::{FormatSpec, RecordError, VariantRecord, FIXED_COLUMNS, MANDATORY_COLUMNS};
use crate::core::types::{Phasing, GQ_KEY, GT_KEY, MISSING_SAMPLE};

/// GQ written into repaired calls when none is configured
pub const DEFAULT_REPAIR_GQ: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// GQ written into every repaired or filled sample column
    pub gq: u32,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            gq: DEFAULT_REPAIR_GQ,
        }
    }
}

/// Outcome for a single sample column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleRepair {
    /// Called genotype; the column is kept byte-for-byte
    Untouched,
    /// Column was the bare `.` marker and has been expanded to every FORMAT key
    Filled(String),
    /// `./.` or `.|.` genotype rewritten to homozygous reference
    Repaired(String),
}

/// Rewrite one sample column.
///
/// `index` is the 0-based sample number, used in errors.
///
/// # Errors
///
/// Returns `RecordError::FieldCountMismatch` if the column has more subfields
/// than `format` declares.
pub fn normalize_sample(
    format: &FormatSpec,
    sample: &str,
    gq: &str,
    index: usize,
) -> Result<SampleRepair, RecordError> {
    if sample == MISSING_SAMPLE {
        let fields: Vec<&str> = format
            .keys()
            .iter()
            .map(|key| match key.as_str() {
                GT_KEY => Phasing::Unphased.hom_ref(),
                GQ_KEY => gq,
                _ => ".",
            })
            .collect();
        return Ok(SampleRepair::Filled(fields.join(":")));
    }

    let mut fields: Vec<&str> = sample.split(':').collect();
    if fields.len() > format.len() {
        return Err(RecordError::FieldCountMismatch {
            sample: index + 1,
            found: fields.len(),
            declared: format.len(),
        });
    }

    // Trailing subfields may be omitted, so keys can point past the end
    let Some(gt) = format.position(GT_KEY).filter(|&i| i < fields.len()) else {
        return Ok(SampleRepair::Untouched);
    };
    let Some(phasing) = Phasing::of_missing_call(fields[gt]) else {
        return Ok(SampleRepair::Untouched);
    };

    fields[gt] = phasing.hom_ref();
    if let Some(gq_index) = format.position(GQ_KEY).filter(|&i| i < fields.len()) {
        fields[gq_index] = gq;
    }
    Ok(SampleRepair::Repaired(fields.join(":")))
}

/// Counts collected while normalizing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairStats {
    /// Records processed
    pub records: u64,
    /// Sample columns with a missing genotype rewritten to `0/0` or `0|0`
    pub repaired_samples: u64,
    /// Bare `.` sample columns expanded
    pub filled_samples: u64,
}

/// Rewrites missing genotype calls as homozygous reference.
///
/// Not coordinate-aware; works on any record stream.
#[derive(Debug, Clone)]
pub struct GenotypeNormalizer {
    gq: String,
    stats: RepairStats,
}

impl GenotypeNormalizer {
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            gq: config.gq.to_string(),
            stats: RepairStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> &RepairStats {
        &self.stats
    }

    /// Normalize every sample column of `record`, returning the output line.
    ///
    /// Records without a FORMAT column are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::FieldCountMismatch` if any sample column has more
    /// subfields than FORMAT declares.
    pub fn normalize(&mut self, record: &VariantRecord) -> Result<String, RecordError> {
        self.stats.records += 1;

        let mut columns = record.columns();
        let fixed: Vec<&str> = columns.by_ref().take(FIXED_COLUMNS).collect();
        if fixed.len() < FIXED_COLUMNS {
            return Ok(record.as_str().to_string());
        }

        let format = FormatSpec::parse(fixed[MANDATORY_COLUMNS]);
        let mut line = String::with_capacity(record.as_str().len() + 16);
        line.push_str(&fixed.join("\t"));

        for (index, sample) in columns.enumerate() {
            line.push('\t');
            match normalize_sample(&format, sample, &self.gq, index)? {
                SampleRepair::Untouched => line.push_str(sample),
                SampleRepair::Filled(filled) => {
                    self.stats.filled_samples += 1;
                    line.push_str(&filled);
                }
                SampleRepair::Repaired(repaired) => {
                    self.stats.repaired_samples += 1;
                    line.push_str(&repaired);
                }
            }
        }
        Ok(line)
    }
}
