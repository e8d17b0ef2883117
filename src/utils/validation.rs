//! Centralized limits and helper checks for header parsing.

/// Maximum number of `##contig` declarations accepted in a single header
pub const MAX_CONTIGS: usize = 100_000;

/// Maximum number of lines accepted before the `#CHROM` line
pub const MAX_HEADER_LINES: usize = 1_000_000;

/// Check if adding another contig would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new contig.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_contig_limit(count: usize) -> Option<String> {
    if count >= MAX_CONTIGS {
        Some(format!(
            "Too many contigs: adding another would exceed maximum of {MAX_CONTIGS}"
        ))
    } else {
        None
    }
}

/// Same contract as [`check_contig_limit`], for header lines.
#[must_use]
pub fn check_header_limit(count: usize) -> Option<String> {
    if count >= MAX_HEADER_LINES {
        Some(format!(
            "Too many header lines: adding another would exceed maximum of {MAX_HEADER_LINES}"
        ))
    } else {
        None
    }
}

/// True for the `-` path that stands for stdin/stdout.
#[must_use]
pub fn is_stdio(path: &std::path::Path) -> bool {
    path.as_os_str() == "-"
}
