//! Human-readable rendering of deconfliction reports.

use std::fmt::Write;

use deconflict_core::{ConflictEpisode, DeconflictionReport, SafetyBuffer};

/// Episodes listed per conflicting owner before the rest are folded.
pub const MAX_EPISODES_PER_OWNER: usize = 3;

/// Approval or denial text for one report.
pub fn render_summary(report: &DeconflictionReport, buffer: SafetyBuffer) -> String {
    let mut out = String::new();

    if report.is_clear() {
        let _ = writeln!(out, "Mission APPROVED: no conflicts detected");
        let _ = writeln!(
            out,
            "  {} keeps {:.1}m separation from all checked traffic",
            report.primary_owner_id,
            buffer.distance()
        );
    } else {
        let _ = writeln!(
            out,
            "Mission DENIED: {} conflict episode(s)",
            report.episodes.len()
        );
        for owner in report.conflicting_owners() {
            let episodes: Vec<&ConflictEpisode> = report.episodes_with(owner).collect();
            let _ = writeln!(out, "\n  Conflict with {} ({} episode(s)):", owner, episodes.len());
            for episode in episodes.iter().take(MAX_EPISODES_PER_OWNER) {
                let _ = writeln!(out, "    {}", describe_episode(episode));
            }
            if episodes.len() > MAX_EPISODES_PER_OWNER {
                let _ = writeln!(
                    out,
                    "    ... and {} more",
                    episodes.len() - MAX_EPISODES_PER_OWNER
                );
            }
        }
    }

    if !report.skipped.is_empty() {
        let _ = writeln!(
            out,
            "\n  Not checked (invalid missions): {}",
            report.skipped.join(", ")
        );
    }

    out
}

fn describe_episode(episode: &ConflictEpisode) -> String {
    let location = episode.midpoint();
    format!(
        "t={:.2}s..{:.2}s, closest at t={:.2}s near ({:.1}, {:.1}, {:.1}), min distance {:.2}m",
        episode.t_enter,
        episode.t_exit,
        episode.t_min,
        location.x,
        location.y,
        location.z,
        episode.min_distance
    )
}

/// One row of the demo summary table.
#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub scenario: String,
    pub approved: bool,
    pub episodes: usize,
}

pub fn render_table(rows: &[SummaryRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<32} {:<10} {:>8}", "Scenario", "Status", "Episodes");
    let _ = writeln!(out, "{}", "-".repeat(52));
    for row in rows {
        let status = if row.approved { "APPROVED" } else { "DENIED" };
        let _ = writeln!(out, "{:<32} {:<10} {:>8}", row.scenario, status, row.episodes);
    }
    out
}
