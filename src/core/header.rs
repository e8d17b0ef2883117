use std::collections::HashSet;

use crate::core::record::FIXED_COLUMNS;

/// Prefix of an INFO field declaration line
pub const INFO_PREFIX: &str = "##INFO=";

/// Chromosome labels declared with `##contig=<ID=...>` in a header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContigSet {
    names: HashSet<String>,
}

impl ContigSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ContigSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The header of a VCF stream: metadata lines followed by the `#CHROM` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfHeader {
    /// Every line before `#CHROM`, in file order
    pub meta_lines: Vec<String>,

    /// The `#CHROM ...` column header line
    pub column_line: String,

    /// Contigs declared in the metadata
    pub contigs: ContigSet,
}

impl VcfHeader {
    /// Number of sample columns named by the `#CHROM` line.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.column_line
            .split('\t')
            .count()
            .saturating_sub(FIXED_COLUMNS)
    }

    pub fn info_lines(&self) -> impl Iterator<Item = &str> {
        self.meta_lines
            .iter()
            .map(String::as_str)
            .filter(|line| line.starts_with(INFO_PREFIX))
    }

    /// All header lines in output order, `#CHROM` last.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.meta_lines
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.column_line.as_str()))
    }

    /// Header for the merged stream.
    ///
    /// Keeps every line of `self` in order and appends, just before `#CHROM`,
    /// each `##INFO=` line of `sites` that does not already appear verbatim in
    /// `self`. Contigs and sample columns are those of `self`.
    #[must_use]
    pub fn reconcile(&self, sites: &VcfHeader) -> VcfHeader {
        let mut seen: HashSet<&str> = self.meta_lines.iter().map(String::as_str).collect();
        seen.insert(self.column_line.as_str());

        let mut meta_lines = self.meta_lines.clone();
        for line in sites.info_lines() {
            if seen.insert(line) {
                meta_lines.push(line.to_string());
            }
        }

        VcfHeader {
            meta_lines,
            column_line: self.column_line.clone(),
            contigs: self.contigs.clone(),
        }
    }
}
