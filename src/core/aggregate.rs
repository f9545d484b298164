use super::{
    classify::classify,
    models::ResultRecord,
};

/// Summary counts over a result set. Buckets overlap: a record may count in
/// several of them or in none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub usable: usize,
    pub biased: usize,
    pub low_quality: usize,
}

impl AggregateStats {
    /// Chart rows in display order.
    pub fn bars(&self) -> [(&'static str, usize); 3] {
        [("Usable for training", self.usable), ("With bias", self.biased), ("Low quality", self.low_quality)]
    }

    pub fn max(&self) -> usize {
        self.usable.max(self.biased).max(self.low_quality)
    }
}

pub fn aggregate(results: &[ResultRecord]) -> AggregateStats {
    results.iter().map(classify).fold(AggregateStats::default(), |mut stats, verdicts| {
        stats.usable += verdicts.usable.is_yes() as usize;
        stats.biased += verdicts.biased.is_yes() as usize;
        stats.low_quality += verdicts.low_quality.is_yes() as usize;
        stats
    })
}
