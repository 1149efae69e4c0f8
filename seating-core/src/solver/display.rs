//! Formatting helpers for debugging and logging.

use crate::models::FitnessRecord;
use std::fmt;

/// A `Display` adapter for a score breakdown, used by the driver's final
/// `log::info!` summary (gated on `LoggingOptions::log_final_score_breakdown`).
///
/// ```text
/// === SCORE BREAKDOWN ===
/// Total: 0.812
///   Friend Proximity: 0.700
///   VIP Placement:    1.000
///   Group Cohesion:   0.650
///   Stage Distance:   0.800
/// ```
pub struct ScoreBreakdown<'a>(pub &'a FitnessRecord);

impl fmt::Display for ScoreBreakdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SCORE BREAKDOWN ===")?;
        writeln!(f, "Total: {:.3}", self.0.total)?;
        writeln!(f, "  Friend Proximity: {:.3}", self.0.friend_proximity)?;
        writeln!(f, "  VIP Placement:    {:.3}", self.0.vip_placement)?;
        writeln!(f, "  Group Cohesion:   {:.3}", self.0.group_cohesion)?;
        write!(f, "  Stage Distance:   {:.3}", self.0.stage_distance)
    }
}

/// Formats a human-readable score breakdown. A thin wrapper over
/// [`ScoreBreakdown`] for callers that want an owned `String`.
pub fn format_score_breakdown(fitness: &FitnessRecord) -> String {
    ScoreBreakdown(fitness).to_string()
}
