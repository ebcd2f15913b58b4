use std::ops::Range;

/// One iteration of the receding horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First period optimised in this iteration.
    pub start: usize,
    /// Number of periods optimised, including the lookahead tail.
    pub horizon_periods: usize,
    /// Number of periods the revise constraints (trade, labour, ecology) cover.
    pub revise_periods: usize,
    /// Number of leading periods committed to the plan.
    pub commit: usize,
}

impl Window {
    /// Every period optimised in this iteration.
    pub fn horizon(&self) -> Range<usize> {
        self.start..self.start + self.horizon_periods
    }

    /// The periods the revise constraints apply to.
    pub fn revise(&self) -> Range<usize> {
        self.start..self.start + self.revise_periods
    }

    pub fn in_revise(&self, t: usize) -> bool {
        self.revise().contains(&t)
    }

    /// The periods whose results are kept.
    pub fn committed(&self) -> Range<usize> {
        self.start..self.start + self.commit
    }
}

/// Minimum number of economy periods needed to plan `periods` periods.
///
/// The last window starts at `revise * (ceil(periods / revise) - 1)` and
/// still needs its full horizon of data.
pub fn required_periods(periods: usize, horizon_periods: usize, revise_periods: usize) -> usize {
    revise_periods * (periods.div_ceil(revise_periods) - 1) + horizon_periods
}

/// Generates the windows at `0, revise, 2 * revise, ...` up to `periods`.
pub fn windows(periods: usize, horizon_periods: usize, revise_periods: usize) -> Vec<Window> {
    (0..periods)
        .step_by(revise_periods)
        .map(|start| Window {
            start,
            horizon_periods,
            revise_periods,
            commit: revise_periods.min(periods - start),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_cover_every_period_once() {
        let windows = windows(5, 3, 2);
        let starts: Vec<_> = windows.iter().map(|w| w.start).collect();
        assert_eq!(starts, vec![0, 2, 4]);
        let committed: Vec<usize> = windows.iter().flat_map(|w| w.committed()).collect();
        assert_eq!(committed, vec![0, 1, 2, 3, 4]);
        assert_eq!(windows[2].commit, 1);
        assert_eq!(windows[2].horizon(), 4..7);
        assert_eq!(windows[2].revise(), 4..6);
    }

    #[test]
    fn single_window_when_revise_covers_all() {
        let windows = windows(4, 4, 4);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].commit, 4);
    }

    #[test]
    fn required_periods_match_last_window() {
        assert_eq!(required_periods(5, 3, 2), 7);
        assert_eq!(required_periods(4, 2, 2), 4);
        assert_eq!(required_periods(3, 3, 1), 5);
        assert_eq!(required_periods(1, 6, 1), 6);
        let last = *windows(5, 3, 2).last().unwrap();
        assert_eq!(last.horizon().end, required_periods(5, 3, 2));
    }
}
