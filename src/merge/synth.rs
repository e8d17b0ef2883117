use crate::core::record::SiteRecord;
use crate::core::types::{GQ_KEY, GT_KEY, SYNTHESIZED_GENOTYPE};

/// Build a homozygous-reference record for a site missing from the call set.
///
/// The site's eight mandatory columns are reused unchanged, followed by a
/// FORMAT column and `n_samples` identical sample columns: `GT` / `0|0`
/// without a GQ, or `GT:GQ` / `0|0:<gq>` with one.
///
/// # Examples
///
/// ```
/// use homref_fill::core::record::{SiteRecord, VariantRecord};
/// use homref_fill::merge::synth::synthesize_site;
///
/// let site = SiteRecord::new(VariantRecord::parse("1\t200\trs2\tC\tT\t.\t.\t.").unwrap());
/// assert_eq!(
///     synthesize_site(&site, Some(30), 2),
///     "1\t200\trs2\tC\tT\t.\t.\t.\tGT:GQ\t0|0:30\t0|0:30"
/// );
/// ```
#[must_use]
pub fn synthesize_site(site: &SiteRecord, gq: Option<u32>, n_samples: usize) -> String {
    let sample = match gq {
        Some(gq) => format!("{SYNTHESIZED_GENOTYPE}:{gq}"),
        None => SYNTHESIZED_GENOTYPE.to_string(),
    };

    let mandatory = site.mandatory_columns();
    let mut line = String::with_capacity(mandatory.len() + 8 + n_samples * (sample.len() + 1));
    line.push_str(mandatory);
    line.push('\t');
    line.push_str(GT_KEY);
    if gq.is_some() {
        line.push(':');
        line.push_str(GQ_KEY);
    }
    for _ in 0..n_samples {
        line.push('\t');
        line.push_str(&sample);
    }
    line
}
