use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

/// Period-over-period change of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Change {
    pub percent: f64,
    pub direction: Direction,
    pub favorable: bool,
}

impl Change {
    pub fn flat() -> Self {
        Self {
            percent: 0.0,
            direction: Direction::Flat,
            favorable: true,
        }
    }

    /// `"↑ 50.0% vs last period"`, or `"0.0%"` when there is no baseline.
    pub fn text(&self) -> String {
        let arrow = match self.direction {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Flat => return "0.0%".to_string(),
        };
        format!("{} {:.1}% vs last period", arrow, self.percent.abs())
    }

    pub fn color_class(&self) -> &'static str {
        if self.favorable {
            "green"
        } else {
            "red"
        }
    }
}

/// A change as the view shows it: the numbers plus text and color class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeSummary {
    #[serde(flatten)]
    pub change: Change,
    pub text: String,
    pub color: &'static str,
}

impl From<Change> for ChangeSummary {
    fn from(change: Change) -> Self {
        Self {
            text: change.text(),
            color: change.color_class(),
            change,
        }
    }
}

/// Percent change from `previous` to `current`. A zero baseline is reported
/// as flat and favorable.
pub fn compute_change(current: f64, previous: f64, higher_is_better: bool) -> Change {
    if previous == 0.0 {
        return Change::flat();
    }

    let percent = (current - previous) / previous * 100.0;
    if !percent.is_finite() {
        return Change::flat();
    }

    let direction = if percent >= 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    Change {
        percent,
        direction,
        favorable: (direction == Direction::Up) == higher_is_better,
    }
}
