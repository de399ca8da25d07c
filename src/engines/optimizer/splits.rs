use crate::config::EvaluationConfig;
use crate::error::ParetuneError;
use chrono::{Duration, NaiveDate};

/// One unit of a candidate's evaluation: which data split to score against and
/// which repetition this is. The external scoring engine decides what data a
/// split index maps to; `window` and `days` below cover the two common cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSpec {
    pub split: usize,
    pub repeat: usize,
}

/// How a single individual's evaluation is partitioned into sub-evaluations.
///
/// Raw objective scores are averaged over all specs of the plan, so a plan of
/// one split and one repeat degenerates to a single scoring call.
#[derive(Debug, Clone)]
pub struct EvaluationPlan {
    pub num_splits: usize,
    pub split_repeats: usize,
    pub daily_splits: bool,
}

impl EvaluationPlan {
    pub fn from_config(config: &EvaluationConfig) -> Self {
        Self {
            num_splits: config.num_splits,
            split_repeats: config.split_repeats,
            daily_splits: config.daily_splits,
        }
    }

    /// All sub-evaluations of one individual, repeat-major so a full pass over
    /// the splits completes before the next repetition begins.
    pub fn specs(&self) -> Vec<SplitSpec> {
        let mut specs = Vec::with_capacity(self.num_splits * self.split_repeats);
        for repeat in 0..self.split_repeats {
            for split in 0..self.num_splits {
                specs.push(SplitSpec { split, repeat });
            }
        }
        specs
    }

    /// Contiguous date window for `split`, dividing `[start, end]` into
    /// `num_splits` near-equal ranges. The last window absorbs the remainder.
    pub fn window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        split: usize,
    ) -> Result<(NaiveDate, NaiveDate), ParetuneError> {
        if split >= self.num_splits {
            return Err(ParetuneError::Validation(format!(
                "Split index {} out of range for {} splits",
                split, self.num_splits
            )));
        }
        let total_days = (end - start).num_days() + 1;
        if total_days < self.num_splits as i64 {
            return Err(ParetuneError::Validation(format!(
                "Date range of {} days cannot be divided into {} splits",
                total_days, self.num_splits
            )));
        }

        let days_per_split = total_days / self.num_splits as i64;
        let window_start = start + Duration::days(split as i64 * days_per_split);
        let window_end = if split == self.num_splits - 1 {
            end
        } else {
            window_start + Duration::days(days_per_split - 1)
        };
        Ok((window_start, window_end))
    }

    /// Days belonging to `split` under daily interleaving: split `k` takes
    /// every `num_splits`-th day starting at offset `k`.
    pub fn days(&self, start: NaiveDate, end: NaiveDate, split: usize) -> Vec<NaiveDate> {
        let total_days = (end - start).num_days() + 1;
        (0..total_days)
            .filter(|day| (*day as usize) % self.num_splits == split % self.num_splits)
            .map(|day| start + Duration::days(day))
            .collect()
    }
}
