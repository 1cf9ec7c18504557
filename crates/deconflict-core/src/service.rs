//! Mission deconfliction service.
//!
//! Checks one primary mission against every other planned mission and
//! produces the final verdict with its explained conflict episodes.

use rayon::prelude::*;

use crate::aggregate::aggregate_conflicts;
use crate::approach::segment_sweep;
use crate::error::Result;
use crate::models::{ConflictEpisode, DeconflictionReport, Mission, Verdict};
use crate::overlap::resolve_overlap;
use crate::rules::{EngineRules, SafetyBuffer};
use crate::trajectory::Trajectory;

/// Result of checking the primary against a single other mission.
enum PairOutcome {
    Checked(Vec<ConflictEpisode>),
    Skipped(String),
}

/// Strategic deconfliction engine.
///
/// Holds only immutable settings; every call to [`Deconflictor::evaluate`]
/// receives its missions explicitly.
#[derive(Debug, Clone, Default)]
pub struct Deconflictor {
    rules: EngineRules,
}

impl Deconflictor {
    pub fn new(rules: EngineRules) -> Self {
        Self { rules }
    }

    pub fn with_buffer(buffer: SafetyBuffer) -> Self {
        Self::new(EngineRules::with_buffer(buffer))
    }

    pub fn rules(&self) -> &EngineRules {
        &self.rules
    }

    /// Check `primary` against every mission in `others`.
    ///
    /// Fails only when the primary mission itself is invalid. Invalid other
    /// missions are logged, listed in [`DeconflictionReport::skipped`] and
    /// left out of the check.
    pub fn evaluate(&self, primary: &Mission, others: &[Mission]) -> Result<DeconflictionReport> {
        let primary_trajectory = Trajectory::new(primary)?;

        let check = |other: &Mission| self.check_other(&primary_trajectory, other);
        let outcomes: Vec<PairOutcome> =
            if self.rules.parallel && others.len() >= self.rules.min_parallel_missions {
                others.par_iter().map(check).collect()
            } else {
                others.iter().map(check).collect()
            };

        let mut episodes = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                PairOutcome::Checked(found) => episodes.extend(found),
                PairOutcome::Skipped(owner_id) => skipped.push(owner_id),
            }
        }

        // Stable sort: ties keep the order of `others`.
        episodes.sort_by(|a, b| a.t_enter.total_cmp(&b.t_enter));

        let verdict = if episodes.is_empty() {
            Verdict::Clear
        } else {
            Verdict::Conflict
        };

        tracing::info!(
            primary = %primary.owner_id,
            checked = others.len() - skipped.len(),
            skipped = skipped.len(),
            episodes = episodes.len(),
            ?verdict,
            "Mission evaluated"
        );

        Ok(DeconflictionReport {
            primary_owner_id: primary.owner_id.clone(),
            verdict,
            episodes,
            skipped,
        })
    }

    fn check_other(&self, primary: &Trajectory<'_>, other: &Mission) -> PairOutcome {
        match Trajectory::new(other) {
            Ok(other) => PairOutcome::Checked(self.check_pair(primary, &other)),
            Err(err) => {
                tracing::warn!(
                    owner = %other.owner_id,
                    "Skipping other mission: {}",
                    err
                );
                PairOutcome::Skipped(other.owner_id.clone())
            }
        }
    }

    /// Conflict episodes between two validated trajectories, in time order.
    pub fn check_pair(
        &self,
        primary: &Trajectory<'_>,
        other: &Trajectory<'_>,
    ) -> Vec<ConflictEpisode> {
        let Some(overlap) = resolve_overlap(primary.mission(), other.mission()) else {
            tracing::debug!(
                primary = primary.owner_id(),
                other = other.owner_id(),
                "No temporal overlap"
            );
            return Vec::new();
        };

        let pieces = segment_sweep(primary, other, overlap);
        let episodes = aggregate_conflicts(other.owner_id(), &pieces, self.rules.safety_buffer);

        tracing::debug!(
            primary = primary.owner_id(),
            other = other.owner_id(),
            overlap_start = overlap.start,
            overlap_end = overlap.end,
            pieces = pieces.len(),
            episodes = episodes.len(),
            "Pair checked"
        );
        episodes
    }
}

/// Evaluate `primary` against `others` with the given buffer.
pub fn evaluate(
    primary: &Mission,
    others: &[Mission],
    buffer: SafetyBuffer,
) -> Result<DeconflictionReport> {
    Deconflictor::with_buffer(buffer).evaluate(primary, others)
}
