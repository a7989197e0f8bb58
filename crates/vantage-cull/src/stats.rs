//! Frame statistics and compact number formatting for status output.

/// Per-frame summary counts, returned with every [`crate::FrameResult`]
/// and logged at debug level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Candidates evaluated this frame.
    pub candidates: usize,
    /// Candidates that passed the distance and projection tests.
    pub visible: usize,
    /// Visible candidates admitted under the budget.
    pub admitted: usize,
    /// `Show` transitions emitted.
    pub shown: usize,
    /// `Hide` transitions emitted.
    pub hidden: usize,
    /// Total cost of the admitted set under the active metric.
    pub budget_used: u64,
}

impl FrameStats {
    /// Compact one-line summary, e.g.
    /// `visible 12/40 | admitted 8 | +3 -5 | budget 250k`.
    pub fn summary(&self) -> String {
        format!(
            "visible {}/{} | admitted {} | +{} -{} | budget {}",
            self.visible,
            self.candidates,
            self.admitted,
            self.shown,
            self.hidden,
            format_num(self.budget_used),
        )
    }
}

/// Divide and round to one decimal, then truncate to an integer string.
fn format_round(num: u64, division_amount: f64) -> String {
    let rounded = (num as f64 / division_amount * 10.0).round() / 10.0;
    format!("{}", rounded.trunc() as u64)
}

/// Shorten whole numbers for display: 2_000 becomes "2k", 5_432_000
/// becomes "5M", 2_000_000_000 becomes "2B". Smaller numbers stay as-is.
pub fn format_num(num: u64) -> String {
    if num < 1_000 {
        num.to_string()
    } else if num < 1_000_000 {
        format_round(num, 1_000.0) + "k"
    } else if num < 1_000_000_000 {
        format_round(num, 1_000_000.0) + "M"
    } else {
        format_round(num, 1_000_000_000.0) + "B"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers_unchanged() {
        assert_eq!(format_num(0), "0");
        assert_eq!(format_num(999), "999");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(format_num(1000), "1k");
        assert_eq!(format_num(2000), "2k");
        // Rounds to one decimal first, then truncates.
        assert_eq!(format_num(5987), "6k");
        assert_eq!(format_num(5432), "5k");
    }

    #[test]
    fn test_millions_and_billions() {
        assert_eq!(format_num(5_432_000), "5M");
        assert_eq!(format_num(2_000_000_000), "2B");
    }

    #[test]
    fn test_summary_line() {
        let stats = FrameStats {
            candidates: 40,
            visible: 12,
            admitted: 8,
            shown: 3,
            hidden: 5,
            budget_used: 250_000,
        };
        let line = stats.summary();
        assert!(line.contains("visible 12/40"));
        assert!(line.contains("admitted 8"));
        assert!(line.contains("+3 -5"));
        assert!(line.contains("budget 250k"));
    }
}
