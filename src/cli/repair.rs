use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{open_output, write_header, write_summary};
use crate::parsing::source::VcfSource;
use crate::repair::normalizer::{GenotypeNormalizer, NormalizerConfig, DEFAULT_REPAIR_GQ};

#[derive(Args)]
pub struct RepairArgs {
    /// GQ written into repaired calls
    #[arg(default_value_t = DEFAULT_REPAIR_GQ)]
    pub gq: u32,

    /// Input VCF, plain or gzip ('-' for stdin)
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Output VCF ('-' for stdout)
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Write run counts as JSON to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

/// Execute the repair subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read, a record is malformed, or
/// the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RepairArgs) -> anyhow::Result<()> {
    let mut source = VcfSource::open_unfiltered(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let mut writer = open_output(&args.output)?;
    write_header(&mut writer, source.header())?;

    let mut normalizer = GenotypeNormalizer::new(NormalizerConfig { gq: args.gq });
    for record in source.records() {
        let record = record?;
        let line = normalizer
            .normalize(&record)
            .with_context(|| format!("Malformed record at {}", record.coordinate()))?;
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    source.finish()?;

    let stats = normalizer.stats();
    info!(
        records = stats.records,
        repaired_samples = stats.repaired_samples,
        filled_samples = stats.filled_samples,
        "Repair complete"
    );

    if let Some(path) = &args.summary {
        write_summary(path, stats)?;
    }

    Ok(())
}
