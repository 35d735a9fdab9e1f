use rand::Rng;
use tracing::info;

use crate::config::RegroupConfig;
use crate::error::Result;
use crate::extract::{Extraction, extract_all};
use crate::models::ThemeEntry;
use crate::rebalance::rebalance_with_rng;
use crate::summary::RunReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegroupOutcome {
    pub extraction: Extraction,
    pub entries: Vec<ThemeEntry>,
}

impl RegroupOutcome {
    #[must_use]
    pub fn report(&self) -> RunReport {
        RunReport::from_entries(&self.entries).with_rejected_ids(self.extraction.rejected_ids.len())
    }
}

/// Extracts every payload chunk and rebalances the merged groups.
/// Size bounds are validated before any payload is touched.
pub fn run_regroup<I, S>(payloads: I, config: &RegroupConfig) -> Result<RegroupOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    run_regroup_with_rng(payloads, config, &mut rand::thread_rng())
}

pub fn run_regroup_with_rng<I, S, R>(
    payloads: I,
    config: &RegroupConfig,
    rng: &mut R,
) -> Result<RegroupOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let bounds = config.bounds()?;
    let extraction = extract_all(payloads, &config.extract_options())?;
    info!(
        groups = extraction.groups.len(),
        members = extraction.groups.total_members(),
        rejected = extraction.rejected_ids.len(),
        path = extraction.path,
        "extracted groups"
    );
    let entries = rebalance_with_rng(&extraction.groups, bounds, rng);
    Ok(RegroupOutcome {
        extraction,
        entries,
    })
}
