/// Genotype call of a synthesized record
pub const SYNTHESIZED_GENOTYPE: &str = "0|0";

/// A whole sample column holding only the missing-value marker
pub const MISSING_SAMPLE: &str = ".";

/// FORMAT key of the genotype subfield
pub const GT_KEY: &str = "GT";

/// FORMAT key of the genotype quality subfield
pub const GQ_KEY: &str = "GQ";

/// Allele separator style of a diploid genotype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phasing {
    /// `/`
    Unphased,
    /// `|`
    Phased,
}

impl Phasing {
    /// Phasing of a fully missing diploid call (`./.` or `.|.`), if `gt` is one.
    #[must_use]
    pub fn of_missing_call(gt: &str) -> Option<Self> {
        match gt {
            "./." => Some(Self::Unphased),
            ".|." => Some(Self::Phased),
            _ => None,
        }
    }

    /// Homozygous-reference call with this separator
    #[must_use]
    pub fn hom_ref(self) -> &'static str {
        match self {
            Self::Unphased => "0/0",
            Self::Phased => "0|0",
        }
    }
}
