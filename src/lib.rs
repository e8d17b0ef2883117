//! # homref-fill
//!
//! A library for making variant call sets position-complete against a
//! reference site panel.
//!
//! Call sets usually report only sites where some sample carries a variant.
//! Joint analyses often need a dense matrix instead: every sample with a call
//! at every panel site. `homref-fill` walks a sorted call set and a sorted site
//! panel together and, for every panel site the call set lacks, writes a record
//! whose genotypes are all homozygous reference (`0|0`). A separate pass
//! rewrites missing calls (`./.`, `.|.`, `.`) the same way.
//!
//! ## Features
//!
//! - **Streaming merge**: one forward pass, one record per input held in memory
//! - **Contig safety**: sites on contigs the call set does not declare are dropped
//! - **Header reconciliation**: panel `##INFO` lines missing from the call set are added
//! - **Genotype repair**: missing calls become `0/0`/`0|0` with a configured GQ
//!
//! ## Example
//!
//! ```rust
//! use homref_fill::core::record::VariantRecord;
//! use homref_fill::merge::engine::{MergeConfig, MergeEngine};
//!
//! let calls = vec![VariantRecord::parse("1\t100\t.\tA\tG\t.\t.\t.\tGT\t0/1")];
//! let sites = vec![
//!     VariantRecord::parse("1\t100\t.\tA\tG\t.\t.\t."),
//!     VariantRecord::parse("1\t200\t.\tC\tT\t.\t.\t."),
//! ];
//!
//! let engine = MergeEngine::new(
//!     calls.into_iter(),
//!     sites.into_iter(),
//!     ["1"].into_iter().collect(),
//!     1,
//!     MergeConfig::default(),
//! )
//! .unwrap();
//!
//! let lines: Vec<String> = engine.map(|r| r.unwrap().as_str().to_string()).collect();
//! assert_eq!(lines[1], "1\t200\t.\tC\tT\t.\t.\t.\tGT\t0|0");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Coordinates, records, FORMAT keys and headers
//! - [`parsing`]: Streaming VCF reader and input sources
//! - [`merge`]: The coordinate-ordered merge and record synthesis
//! - [`repair`]: Missing-genotype normalization
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod merge;
pub mod parsing;
pub mod repair;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::coordinate::GenomicCoordinate;
pub use crate::core::header::{ContigSet, VcfHeader};
pub use crate::core::record::{FormatSpec, SiteRecord, VariantRecord};
pub use crate::merge::engine::{MergeConfig, MergeEngine, MergeStats};
pub use crate::repair::normalizer::{GenotypeNormalizer, NormalizerConfig};
