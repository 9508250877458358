//! Change detection between consecutive polls.
//!
//! Each tracked metric keeps the last value it was classified against. A
//! value of zero means "nothing usable yet" and is never a data point: it
//! does not count as a change, and it clears the baseline so the next poll
//! starts over.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Confirmed,
    Deaths,
    PercentDied,
}

impl Metric {
    /// Percent-died is compared at two decimal places, counts as-is.
    fn normalize(self, value: f64) -> f64 {
        match self {
            Metric::PercentDied => round2(value),
            Metric::Confirmed | Metric::Deaths => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increased,
    Decreased,
    Unchanged,
}

impl Direction {
    pub fn symbol(self) -> &'static str {
        match self {
            Direction::Increased => "^",
            Direction::Decreased => "v",
            Direction::Unchanged => "<->",
        }
    }
}

/// Outcome of comparing one metric against its previous value.
///
/// `delta` is a magnitude; the sign comes from `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub direction: Direction,
    pub delta: f64,
    pub changed: bool,
}

impl Classification {
    pub const UNCHANGED: Classification = Classification {
        direction: Direction::Unchanged,
        delta: 0.0,
        changed: false,
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricState {
    pub last_value: Option<f64>,
}

/// Classify `new_value` against `state` and move the baseline forward.
pub fn classify(state: &mut MetricState, metric: Metric, new_value: f64) -> Classification {
    let now = metric.normalize(new_value);
    if now == 0.0 {
        state.last_value = None;
        return Classification::UNCHANGED;
    }

    let result = match state.last_value {
        None => Classification::UNCHANGED,
        Some(last) if last == now => Classification::UNCHANGED,
        Some(last) if now > last => Classification {
            direction: Direction::Increased,
            delta: metric.normalize(now - last),
            changed: true,
        },
        Some(last) => Classification {
            direction: Direction::Decreased,
            delta: metric.normalize(last - now),
            changed: true,
        },
    };
    state.last_value = Some(now);
    result
}

/// Last-seen values for every tracked metric, owned by the poll loop.
#[derive(Debug, Clone, Default)]
pub struct Baselines {
    confirmed: MetricState,
    deaths: MetricState,
    percent_died: MetricState,
}

impl Baselines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, metric: Metric) -> &MetricState {
        match metric {
            Metric::Confirmed => &self.confirmed,
            Metric::Deaths => &self.deaths,
            Metric::PercentDied => &self.percent_died,
        }
    }

    pub fn classify(&mut self, metric: Metric, new_value: f64) -> Classification {
        let state = match metric {
            Metric::Confirmed => &mut self.confirmed,
            Metric::Deaths => &mut self.deaths,
            Metric::PercentDied => &mut self.percent_died,
        };
        classify(state, metric, new_value)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Deaths as a percentage of confirmed cases; zero when nothing is confirmed.
pub fn percent_died(deaths: u64, confirmed: u64) -> f64 {
    if confirmed == 0 {
        0.0
    } else {
        deaths as f64 / confirmed as f64 * 100.0
    }
}
