//! Core data types for filling call sets with reference-homozygous genotypes.
//!
//! - [`GenomicCoordinate`](coordinate::GenomicCoordinate): a chromosome/position pair
//!   with the fixed rank ordering used to interleave two sorted streams
//! - [`VariantRecord`](record::VariantRecord), [`SiteRecord`](record::SiteRecord):
//!   one data line of a call set or a site panel
//! - [`FormatSpec`](record::FormatSpec): the FORMAT keys of a record
//! - [`VcfHeader`](header::VcfHeader), [`ContigSet`](header::ContigSet): header lines,
//!   declared contigs and INFO reconciliation
//!
//! ## Chromosome Order
//!
//! | Label | Rank |
//! |-------|------|
//! | `1`..`22` (any integer) | its value |
//! | `X`, `XY` | 23 |
//! | `Y` | 24 |
//! | `MT` | 26 |
//! | anything else | 100 |

pub mod coordinate;
pub mod header;
pub mod record;
pub mod types;
