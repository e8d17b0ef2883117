//! Command-line interface for homref-fill.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **insert**: Merge a site panel into a call set, adding `0|0` records for
//!   every panel site the call set lacks
//! - **repair**: Rewrite missing genotype calls (`./.`, `.|.`, `.`) as
//!   homozygous reference
//!
//! ## Usage
//!
//! ```text
//! # Fill a call set, omitting GQ in added records
//! homref-fill insert calls.vcf.gz panel.vcf.gz > filled.vcf
//!
//! # Same, with GQ 30 in added records and missing calls repaired
//! homref-fill insert calls.bcf panel.bcf 30 --repair > filled.vcf
//!
//! # Repair a stream with GQ 20
//! bcftools view calls.bcf | homref-fill repair 20 > repaired.vcf
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::core::header::VcfHeader;
use crate::utils::validation::is_stdio;

pub mod insert;
pub mod repair;

#[derive(Parser)]
#[command(name = "homref-fill")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Fill variant call sets with homozygous-reference genotypes")]
#[command(
    long_about = "homref-fill makes a call set position-complete against a reference site panel.\n\nIt provides:\n- Insertion of 0|0 records for panel sites absent from the call set\n- Repair of missing genotype calls as homozygous reference\n\nBoth inputs must be sorted by chromosome (1-22, X/XY, Y, MT, others) and position."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add homozygous-reference records for panel sites missing from a call set
    Insert(insert::InsertArgs),

    /// Rewrite missing genotype calls as homozygous reference
    Repair(repair::RepairArgs),
}

/// Buffered writer for `path`, or stdout for `-`.
pub(crate) fn open_output(path: &Path) -> anyhow::Result<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = if is_stdio(path) {
        Box::new(std::io::stdout().lock())
    } else {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Box::new(file)
    };
    Ok(BufWriter::new(sink))
}

pub(crate) fn write_header(writer: &mut impl Write, header: &VcfHeader) -> std::io::Result<()> {
    for line in header.lines() {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

pub(crate) fn write_summary(path: &Path, summary: &impl Serialize) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write summary {}", path.display()))
}
