use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::coordinate::GenomicCoordinate;
use crate::core::header::ContigSet;
use crate::core::record::{SiteRecord, VariantRecord};
use crate::merge::cursor::RecordCursor;
use crate::merge::synth::synthesize_site;

/// Settings for the merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeConfig {
    /// GQ written into synthesized records; `None` omits the GQ subfield
    pub synthesized_gq: Option<u32>,
}

impl MergeConfig {
    /// Config from a command-line GQ value, where 0 means "no GQ".
    #[must_use]
    pub fn from_gq(gq: u32) -> Self {
        Self {
            synthesized_gq: (gq > 0).then_some(gq),
        }
    }
}

/// What the merge does next, given the two peeked coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStep {
    /// Call set is behind (or sites are exhausted): emit the call-set record
    TakeInput,
    /// Sites are behind (or the call set is exhausted): synthesize for the site
    TakeSite,
    /// Same coordinate: emit the call-set record and discard the site
    TakeBoth,
    /// Both streams exhausted
    Done,
}

/// Decide the next merge step from the current heads of both streams.
#[must_use]
pub fn next_step(input: Option<&GenomicCoordinate>, site: Option<&GenomicCoordinate>) -> MergeStep {
    match (input, site) {
        (Some(input), Some(site)) => match input.cmp(site) {
            Ordering::Less => MergeStep::TakeInput,
            Ordering::Greater => MergeStep::TakeSite,
            Ordering::Equal => MergeStep::TakeBoth,
        },
        (Some(_), None) => MergeStep::TakeInput,
        (None, Some(_)) => MergeStep::TakeSite,
        (None, None) => MergeStep::Done,
    }
}

/// One line of merged output
#[derive(Debug, Clone)]
pub enum MergedRecord {
    /// A call-set record, unchanged
    Input(VariantRecord),
    /// A homozygous-reference record built from a site
    Synthesized(String),
}

impl MergedRecord {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Input(record) => record.as_str(),
            Self::Synthesized(line) => line,
        }
    }

    #[must_use]
    pub fn is_synthesized(&self) -> bool {
        matches!(self, Self::Synthesized(_))
    }
}

/// Counts collected while merging
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Call-set records written
    pub input_records: u64,
    /// Records synthesized for sites absent from the call set
    pub synthesized_records: u64,
    /// Sites already present in the call set
    pub matched_sites: u64,
    /// Sites skipped because their contig is not declared in the call set
    pub dropped_sites: u64,
}

/// Coordinate-ordered merge of a call set with a site panel.
///
/// Yields every call-set record once, unchanged and in order, interleaved with
/// a synthesized record for each site that has no call-set record at its
/// coordinate and whose contig is declared. Both streams must be sorted.
pub struct MergeEngine<I, S> {
    input: RecordCursor<I>,
    sites: RecordCursor<S>,
    contigs: ContigSet,
    n_samples: usize,
    config: MergeConfig,
    stats: MergeStats,
    warned_contigs: HashSet<String>,
    failed: bool,
}

impl<I, S, E> MergeEngine<I, S>
where
    I: Iterator<Item = Result<VariantRecord, E>>,
    S: Iterator<Item = Result<VariantRecord, E>>,
{
    /// # Errors
    ///
    /// Returns the first error of either stream if its first record cannot be read.
    pub fn new(
        input: I,
        sites: S,
        contigs: ContigSet,
        n_samples: usize,
        config: MergeConfig,
    ) -> Result<Self, E> {
        Ok(Self {
            input: RecordCursor::new(input)?,
            sites: RecordCursor::new(sites)?,
            contigs,
            n_samples,
            config,
            stats: MergeStats::default(),
            warned_contigs: HashSet::new(),
            failed: false,
        })
    }

    #[must_use]
    pub fn stats(&self) -> &MergeStats {
        &self.stats
    }

    fn step(&mut self) -> Result<Option<MergedRecord>, E> {
        loop {
            match next_step(self.input.peek_coordinate(), self.sites.peek_coordinate()) {
                MergeStep::Done => return Ok(None),
                MergeStep::TakeInput => {
                    let record = self.input.advance()?;
                    self.stats.input_records += 1;
                    return Ok(record.map(MergedRecord::Input));
                }
                MergeStep::TakeBoth => {
                    let record = self.input.advance()?;
                    self.sites.advance()?;
                    self.stats.input_records += 1;
                    self.stats.matched_sites += 1;
                    return Ok(record.map(MergedRecord::Input));
                }
                MergeStep::TakeSite => {
                    let Some(site) = self.sites.advance()?.map(SiteRecord::from) else {
                        continue;
                    };
                    if self.contigs.contains(site.chromosome()) {
                        self.stats.synthesized_records += 1;
                        let line = synthesize_site(&site, self.config.synthesized_gq, self.n_samples);
                        return Ok(Some(MergedRecord::Synthesized(line)));
                    }

                    self.stats.dropped_sites += 1;
                    if self.warned_contigs.insert(site.chromosome().to_string()) {
                        warn!(
                            contig = %site.chromosome(),
                            "Site panel contig not declared in call set header, dropping its sites"
                        );
                    }
                    debug!(site = %site.coordinate(), "Dropped site on undeclared contig");
                }
            }
        }
    }
}

impl<I, S, E> Iterator for MergeEngine<I, S>
where
    I: Iterator<Item = Result<VariantRecord, E>>,
    S: Iterator<Item = Result<VariantRecord, E>>,
{
    type Item = Result<MergedRecord, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.step() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
