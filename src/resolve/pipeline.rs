//! Four-stage production pipeline.
//!
//! Each turn a group's output moves one stage closer to finished. No stage
//! passes on more than the group produced this turn, so a group that loses
//! fuel or labor slows its whole pipeline down.

use crate::galaxy::{StageBuffer, STAGE_COUNT};

/// How much of the promoted work survives into the finished stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Yield {
    /// Everything promoted is finished output.
    Full,
    /// Only this percentage survives, rounded up. Used for mining.
    Percent(u8),
}

impl Yield {
    pub fn apply(self, quantity: u64) -> u64 {
        match self {
            Yield::Full => quantity,
            Yield::Percent(pct) => {
                let scaled = u128::from(quantity) * u128::from(pct);
                scaled.div_ceil(100) as u64
            }
        }
    }
}

/// What one turn's advance moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    /// Taken out of stage 3.
    pub promoted: u64,
    /// Added to the finished stage after yield.
    pub finished: u64,
}

impl StageBuffer {
    /// Advances the buffer one turn with `produced` new work.
    pub fn advance(&mut self, produced: u64, yield_fn: Yield) -> Advance {
        let s = &mut self.stages;
        let last = STAGE_COUNT - 1;

        let promoted = s[last - 1].min(produced);
        s[last - 1] -= promoted;
        let finished = yield_fn.apply(promoted);
        s[last] += finished;

        // Each earlier stage tops up the next one to at most `produced`.
        for stage in (0..last - 1).rev() {
            let room = produced.saturating_sub(s[stage + 1]);
            let moved = s[stage].min(room);
            s[stage] -= moved;
            s[stage + 1] += moved;
        }
        s[0] += produced;

        Advance { promoted, finished }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yield_percent_rounds_up() {
        assert_eq!(Yield::Full.apply(17), 17);
        assert_eq!(Yield::Percent(40).apply(100), 40);
        assert_eq!(Yield::Percent(40).apply(3), 2);
        assert_eq!(Yield::Percent(0).apply(50), 0);
        assert_eq!(Yield::Percent(100).apply(50), 50);
    }

    #[test]
    fn empty_pipeline_fills_over_four_turns() {
        let mut buffer = StageBuffer::default();
        buffer.advance(10, Yield::Full);
        assert_eq!(buffer.stages, [10, 0, 0, 0]);
        buffer.advance(10, Yield::Full);
        assert_eq!(buffer.stages, [10, 10, 0, 0]);
        buffer.advance(10, Yield::Full);
        assert_eq!(buffer.stages, [10, 10, 10, 0]);
        let advance = buffer.advance(10, Yield::Full);
        assert_eq!(buffer.stages, [10, 10, 10, 10]);
        assert_eq!(advance, Advance { promoted: 10, finished: 10 });
    }

    #[test]
    fn throughput_is_capped_by_production() {
        let mut buffer = StageBuffer::new([100, 100, 100, 0]);
        let advance = buffer.advance(30, Yield::Full);
        assert_eq!(advance.promoted, 30);
        assert_eq!(buffer.stages, [130, 100, 70, 30]);

        let mut idle = StageBuffer::new([5, 5, 5, 0]);
        idle.advance(0, Yield::Full);
        assert_eq!(idle.stages, [5, 5, 5, 0]);
    }

    #[test]
    fn backfill_tops_up_drained_stages() {
        let mut buffer = StageBuffer::new([50, 0, 4, 0]);
        buffer.advance(20, Yield::Full);
        // stage 3 gave 4; stage 2 had nothing; stage 1 moves up to 20
        assert_eq!(buffer.stages, [50, 20, 0, 4]);
    }

    #[test]
    fn farm_and_factory_conserve_work() {
        let starts = [[0, 0, 0, 0], [3, 9, 1, 0], [100, 0, 50, 7], [40, 40, 40, 0]];
        for start in starts {
            for produced in [0u64, 1, 25, 1000] {
                let mut buffer = StageBuffer::new(start);
                let before = buffer.total();
                buffer.advance(produced, Yield::Full);
                assert_eq!(buffer.total(), before + produced, "{:?} + {}", start, produced);
            }
        }
    }

    #[test]
    fn mining_loses_only_yield() {
        let mut buffer = StageBuffer::new([0, 0, 80, 0]);
        let before = buffer.total();
        let advance = buffer.advance(100, Yield::Percent(25));
        assert_eq!(advance, Advance { promoted: 80, finished: 20 });
        assert_eq!(buffer.total(), before + 100 - (80 - 20));
    }
}
