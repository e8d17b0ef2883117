//! Streaming reader for VCF text.
//!
//! The header is consumed eagerly when the reader is built; data lines are then
//! pulled one at a time through the [`Iterator`] implementation, so at most one
//! record is held in memory.
//!
//! `##contig=<ID=chr1,length=248956422>` lines populate the header's
//! [`ContigSet`]. Only the `ID` key is needed; other keys are ignored.

use std::io::BufRead;

use thiserror::Error;

use crate::core::header::{ContigSet, VcfHeader};
use crate::core::record::{RecordError, VariantRecord};
use crate::utils::validation::{check_contig_limit, check_header_limit};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid VCF header in {stream}: {reason}")]
    InvalidHeader { stream: String, reason: String },

    #[error("Malformed record in {stream} at line {line}: {source}")]
    MalformedRecord {
        stream: String,
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("Too many contigs in {0}: exceeds maximum allowed (100000)")]
    TooManyContigs(String),

    #[error("External reader for {stream} failed: {reason}")]
    Process { stream: String, reason: String },
}

/// Reads a VCF header, then yields data records lazily.
pub struct VcfReader<R> {
    inner: R,
    stream: String,
    header: VcfHeader,
    line_number: usize,
    snps_only: bool,
    buf: String,
}

impl<R: BufRead> VcfReader<R> {
    /// Read the header from `inner`.
    ///
    /// `stream` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidHeader` if the stream ends before a `#CHROM`
    /// line, `ParseError::TooManyContigs` if the contig limit is exceeded, or
    /// `ParseError::Io` on read failure.
    pub fn new(mut inner: R, stream: impl Into<String>) -> Result<Self, ParseError> {
        let stream = stream.into();
        let mut meta_lines = Vec::new();
        let mut contigs = ContigSet::new();
        let mut line_number = 0;
        let mut buf = String::new();

        let column_line = loop {
            buf.clear();
            if inner.read_line(&mut buf)? == 0 {
                return Err(ParseError::InvalidHeader {
                    stream,
                    reason: "reached end of input before the #CHROM line".to_string(),
                });
            }
            line_number += 1;
            let line = trim_line_ending(&buf);

            if line.starts_with("#CHROM") {
                break line.to_string();
            }

            if let Some(reason) = check_header_limit(meta_lines.len()) {
                return Err(ParseError::InvalidHeader { stream, reason });
            }

            if let Some(id) = parse_contig_id(line) {
                if check_contig_limit(contigs.len()).is_some() {
                    return Err(ParseError::TooManyContigs(stream));
                }
                contigs.insert(id);
            }
            meta_lines.push(line.to_string());
        };

        Ok(Self {
            inner,
            stream,
            header: VcfHeader {
                meta_lines,
                column_line,
                contigs,
            },
            line_number,
            snps_only: false,
            buf,
        })
    }

    /// Skip records that are not biallelic SNPs.
    #[must_use]
    pub fn snps_only(mut self, snps_only: bool) -> Self {
        self.snps_only = snps_only;
        self
    }

    #[must_use]
    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    #[must_use]
    pub fn stream(&self) -> &str {
        &self.stream
    }

    fn read_record(&mut self) -> Result<Option<VariantRecord>, ParseError> {
        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = trim_line_ending(&self.buf);
            if line.is_empty() {
                continue;
            }

            let record =
                VariantRecord::parse(line).map_err(|source| ParseError::MalformedRecord {
                    stream: self.stream.clone(),
                    line: self.line_number,
                    source,
                })?;

            if self.snps_only && !record.is_biallelic_snp() {
                continue;
            }
            return Ok(Some(record));
        }
    }
}

impl<R: BufRead> Iterator for VcfReader<R> {
    type Item = Result<VariantRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// The `ID` of a `##contig=<...>` line, if `line` is one.
fn parse_contig_id(line: &str) -> Option<&str> {
    let content = line.strip_prefix("##contig=<")?;
    let content = content.strip_suffix('>').unwrap_or(content);

    split_contig_fields(content).into_iter().find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("id") {
            let value = value.trim().trim_matches('"');
            (!value.is_empty()).then_some(value)
        } else {
            None
        }
    })
}

/// Split contig fields, handling commas inside quoted values.
///
/// This is UTF-8 safe because:
/// - Commas are single-byte ASCII (0x2C)
/// - `char_indices()` yields byte positions at character boundaries
/// - After a comma at position `i`, `i + 1` is always a valid boundary
fn split_contig_fields(content: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, c) in content.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(&content[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if start <= content.len() {
        fields.push(&content[start..]);
    }

    fields
}
