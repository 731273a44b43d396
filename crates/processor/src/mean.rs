//! Running arithmetic mean over integer minutes

/// Integer sum and count; the mean is taken once at the end so results do not
/// depend on the order values were added in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningMean {
    sum: i64,
    count: usize,
}

impl RunningMean {
    pub fn push(&mut self, value: i64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn push_opt(&mut self, value: Option<i64>) {
        if let Some(value) = value {
            self.push(value);
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean of the pushed values, 0 when nothing was pushed
    pub fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}
