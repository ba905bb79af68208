use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Focus,
    Rest,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Focus => f.write_str("Focus"),
            StageKind::Rest => f.write_str("Rest"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub kind: StageKind,
    pub duration_secs: u64,
    /// Position in the sequence, from 0.
    pub ordinal: u128,
    /// 1-based cycle this stage belongs to.
    pub cycle: u128,
    pub total_cycles: u128,
}

impl Stage {
    /// `Focus 2/3`
    pub fn label(&self) -> String {
        format!("{} {}/{}", self.kind, self.cycle, self.total_cycles)
    }
}

/// Ordered focus/rest stages. Starts with Focus, ends with Rest, alternates.
///
/// Every cycle is identical, so stages are computed on demand from the
/// cycle count instead of being stored. Positions are `u128`: a repeat count
/// of `u64::MAX` still has an exact stage count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSequence {
    focus_secs: u64,
    rest_secs: u64,
    total_cycles: u128,
}

impl StageSequence {
    pub fn get(&self, index: u128) -> Option<Stage> {
        if index >= self.len() {
            return None;
        }
        let (kind, duration_secs) = if index % 2 == 0 {
            (StageKind::Focus, self.focus_secs)
        } else {
            (StageKind::Rest, self.rest_secs)
        };
        Some(Stage {
            kind,
            duration_secs,
            ordinal: index,
            cycle: index / 2 + 1,
            total_cycles: self.total_cycles,
        })
    }

    /// Stages in order. Lazy, so it is safe on huge sequences.
    pub fn iter(&self) -> impl Iterator<Item = Stage> + '_ {
        (0..self.len()).map_while(|i| self.get(i))
    }

    pub fn len(&self) -> u128 {
        self.total_cycles * 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_last(&self, index: u128) -> bool {
        self.len().checked_sub(1) == Some(index)
    }

    /// Sum of all stage durations, saturating at `u64::MAX`.
    pub fn total_duration_secs(&self) -> u64 {
        let cycle = u128::from(self.focus_secs) + u128::from(self.rest_secs);
        u64::try_from(cycle.saturating_mul(self.total_cycles)).unwrap_or(u64::MAX)
    }
}

/// One base focus/rest cycle followed by `repeat_count` identical cycles.
pub fn build_sequence(focus_secs: u64, rest_secs: u64, repeat_count: u64) -> StageSequence {
    StageSequence {
        focus_secs,
        rest_secs,
        total_cycles: u128::from(repeat_count) + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_cycle_from_minutes() {
        let seq = build_sequence(25 * 60, 5 * 60, 0);
        let shape: Vec<(StageKind, u64)> = seq.iter().map(|s| (s.kind, s.duration_secs)).collect();
        assert_eq!(shape, [(StageKind::Focus, 1500), (StageKind::Rest, 300)]);
    }

    #[test]
    fn labels_count_cycles() {
        let seq = build_sequence(60, 30, 2);
        let labels: Vec<String> = seq.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            ["Focus 1/3", "Rest 1/3", "Focus 2/3", "Rest 2/3", "Focus 3/3", "Rest 3/3"]
        );
        assert_eq!(seq.total_duration_secs(), 270);
        assert!(seq.is_last(5));
        assert!(!seq.is_last(4));
        assert_eq!(seq.get(6), None);
    }

    #[test]
    fn repeat_beyond_u32_is_exact() {
        let repeat = u64::from(u32::MAX) + 1;
        let seq = build_sequence(1, 1, repeat);
        assert_eq!(seq.len(), 2 * (u128::from(repeat) + 1));

        let last = seq.len() - 1;
        assert!(seq.is_last(last));
        let stage = seq.get(last).unwrap();
        assert_eq!(stage.kind, StageKind::Rest);
        assert_eq!(stage.cycle, u128::from(repeat) + 1);
        assert_eq!(stage.label(), "Rest 4294967297/4294967297");
    }

    #[test]
    fn max_repeat_does_not_overflow() {
        let seq = build_sequence(u64::MAX, u64::MAX, u64::MAX);
        assert_eq!(seq.len(), 2 * (u128::from(u64::MAX) + 1));
        assert!(seq.is_last(seq.len() - 1));
        assert_eq!(seq.get(seq.len() - 2).map(|s| s.kind), Some(StageKind::Focus));
        assert_eq!(seq.total_duration_secs(), u64::MAX);
        assert_eq!(seq.iter().take(3).count(), 3);
    }

    proptest! {
        #[test]
        fn shape_invariants(focus in 1u64..10_000, rest in 1u64..10_000, repeat in 0u64..200) {
            let seq = build_sequence(focus, rest, repeat);
            prop_assert_eq!(seq.len(), 2 * (u128::from(repeat) + 1));
            prop_assert_eq!(seq.iter().count() as u128, seq.len());
            prop_assert_eq!(seq.get(0).map(|s| s.kind), Some(StageKind::Focus));
            prop_assert_eq!(seq.get(seq.len() - 1).map(|s| s.kind), Some(StageKind::Rest));
            for (i, stage) in seq.iter().enumerate() {
                let expected = if i % 2 == 0 { StageKind::Focus } else { StageKind::Rest };
                prop_assert_eq!(stage.kind, expected);
                prop_assert_eq!(stage.ordinal, i as u128);
            }
        }
    }
}
