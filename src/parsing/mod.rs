//! Readers that turn input files into streams of VCF records.
//!
//! - **VCF text** ([`vcf`]): header pass, `##contig` extraction, lazy records
//! - **Input sources** ([`source`]): `bcftools view` or native plain/gzip reading
//!
//! ## Example
//!
//! ```rust
//! use homref_fill::parsing::vcf::VcfReader;
//!
//! let text = "##contig=<ID=1>\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n1\t10\t.\tA\tC\t.\t.\t.\n";
//! let reader = VcfReader::new(text.as_bytes(), "sites").unwrap();
//! assert!(reader.header().contigs.contains("1"));
//! assert_eq!(reader.count(), 1);
//! ```

pub mod source;
pub mod vcf;

pub use vcf::ParseError;
