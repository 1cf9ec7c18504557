//! Merges per-piece separation breaches into conflict episodes.

use crate::approach::{breach_window, closest_approach, ClosestApproach, SegmentPair};
use crate::models::ConflictEpisode;
use crate::rules::SafetyBuffer;

/// Builds conflict episodes for one (primary, other) mission pair.
///
/// Pieces must be pushed in time order, as produced by
/// [`crate::approach::segment_sweep`]. Breaches that meet at a piece
/// boundary join one episode; each episode keeps its single lowest
/// closest approach, the earliest one on ties.
#[derive(Debug)]
pub struct ConflictAggregator<'a> {
    other_owner_id: &'a str,
    threshold: f64,
    open: Option<ConflictEpisode>,
    episodes: Vec<ConflictEpisode>,
}

impl<'a> ConflictAggregator<'a> {
    pub fn new(other_owner_id: &'a str, buffer: SafetyBuffer) -> Self {
        Self {
            other_owner_id,
            threshold: buffer.distance(),
            open: None,
            episodes: Vec::new(),
        }
    }

    pub fn push(&mut self, pair: &SegmentPair) {
        let Some(breach) = breach_window(pair, self.threshold) else {
            self.close();
            return;
        };
        let approach = closest_approach(pair);

        if let Some(open) = self.open.as_mut() {
            if breach.start <= open.t_exit {
                open.t_exit = breach.end;
                if approach.distance < open.min_distance {
                    apply_minimum(open, &approach);
                }
                return;
            }
        }

        self.close();
        self.open = Some(ConflictEpisode {
            other_owner_id: self.other_owner_id.to_string(),
            t_enter: breach.start,
            t_exit: breach.end,
            t_min: approach.t,
            primary_position: approach.primary_position,
            other_position: approach.other_position,
            min_distance: approach.distance,
        });
    }

    fn close(&mut self) {
        if let Some(episode) = self.open.take() {
            self.episodes.push(episode);
        }
    }

    /// Episodes in increasing `t_enter` order.
    pub fn finish(mut self) -> Vec<ConflictEpisode> {
        self.close();
        self.episodes
    }
}

fn apply_minimum(episode: &mut ConflictEpisode, approach: &ClosestApproach) {
    episode.t_min = approach.t;
    episode.primary_position = approach.primary_position;
    episode.other_position = approach.other_position;
    episode.min_distance = approach.distance;
}

/// Run every piece of a pair sweep through a fresh aggregator.
pub fn aggregate_conflicts(
    other_owner_id: &str,
    pieces: &[SegmentPair],
    buffer: SafetyBuffer,
) -> Vec<ConflictEpisode> {
    let mut aggregator = ConflictAggregator::new(other_owner_id, buffer);
    for piece in pieces {
        aggregator.push(piece);
    }
    aggregator.finish()
}
