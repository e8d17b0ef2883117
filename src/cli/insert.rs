use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::cli::{open_output, write_header, write_summary};
use crate::merge::engine::{MergeConfig, MergeEngine, MergeStats, MergedRecord};
use crate::parsing::source::{InputRole, ReaderKind, SourceOptions, VcfSource};
use crate::repair::normalizer::{
    GenotypeNormalizer, NormalizerConfig, RepairStats, DEFAULT_REPAIR_GQ,
};

#[derive(Args)]
pub struct InsertArgs {
    /// Call set (VCF or BCF, optionally compressed), sorted by chromosome and position
    #[arg(required = true)]
    pub input: PathBuf,

    /// Reference site panel, sorted the same way
    #[arg(required = true)]
    pub sites: PathBuf,

    /// GQ written into added records (0 omits the GQ field)
    #[arg(default_value_t = 0)]
    pub gq: u32,

    /// How input files are read
    #[arg(long, value_enum, default_value = "bcftools")]
    pub reader: ReaderKind,

    /// bcftools executable used by the bcftools reader
    #[arg(long, default_value = "bcftools")]
    pub bcftools: PathBuf,

    /// Also repair missing genotype calls in call-set records
    #[arg(long)]
    pub repair: bool,

    /// GQ written into repaired calls (with --repair)
    #[arg(long, default_value_t = DEFAULT_REPAIR_GQ)]
    pub repair_gq: u32,

    /// Output VCF ('-' for stdout)
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Write run counts as JSON to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

#[derive(Serialize)]
struct InsertSummary<'a> {
    merge: &'a MergeStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    repair: Option<&'a RepairStats>,
}

/// Execute the insert subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be opened or read, a record is
/// malformed, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: InsertArgs) -> anyhow::Result<()> {
    let options = SourceOptions {
        reader: args.reader,
        bcftools: args.bcftools.clone(),
    };

    let mut sites = VcfSource::open(&args.sites, InputRole::Sites, &options)
        .with_context(|| format!("Failed to open site panel {}", args.sites.display()))?;
    let mut input = VcfSource::open(&args.input, InputRole::Calls, &options)
        .with_context(|| format!("Failed to open call set {}", args.input.display()))?;

    let header = input.header().reconcile(sites.header());
    info!(
        samples = header.sample_count(),
        contigs = header.contigs.len(),
        info_lines_added = header.meta_lines.len() - input.header().meta_lines.len(),
        "Read headers"
    );

    let mut writer = open_output(&args.output)?;
    write_header(&mut writer, &header)?;

    let mut normalizer = args
        .repair
        .then(|| GenotypeNormalizer::new(NormalizerConfig { gq: args.repair_gq }));

    let mut engine = MergeEngine::new(
        input.records(),
        sites.records(),
        header.contigs.clone(),
        header.sample_count(),
        MergeConfig::from_gq(args.gq),
    )?;

    for merged in engine.by_ref() {
        match (merged?, normalizer.as_mut()) {
            (MergedRecord::Input(record), Some(normalizer)) => {
                let line = normalizer
                    .normalize(&record)
                    .with_context(|| format!("Malformed call-set record at {}", record.coordinate()))?;
                writeln!(writer, "{line}")?;
            }
            (merged, _) => writeln!(writer, "{}", merged.as_str())?,
        }
    }
    let stats = engine.stats().clone();
    drop(engine);

    writer.flush()?;
    input.finish()?;
    sites.finish()?;

    info!(
        input_records = stats.input_records,
        synthesized_records = stats.synthesized_records,
        matched_sites = stats.matched_sites,
        dropped_sites = stats.dropped_sites,
        "Merge complete"
    );
    if let Some(normalizer) = &normalizer {
        let repair = normalizer.stats();
        info!(
            repaired_samples = repair.repaired_samples,
            filled_samples = repair.filled_samples,
            "Repair complete"
        );
    }

    if let Some(path) = &args.summary {
        let summary = InsertSummary {
            merge: &stats,
            repair: normalizer.as_ref().map(GenotypeNormalizer::stats),
        };
        write_summary(path, &summary)?;
    }

    Ok(())
}
