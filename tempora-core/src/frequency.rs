use std::fmt;

use chrono::TimeDelta;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

// Largest unit first; the alias uses the first unit that divides the step.
const UNITS: [(i128, &str); 8] = [
    (7 * 86_400 * NANOS_PER_SECOND, "W"),
    (86_400 * NANOS_PER_SECOND, "D"),
    (3_600 * NANOS_PER_SECOND, "H"),
    (60 * NANOS_PER_SECOND, "min"),
    (NANOS_PER_SECOND, "S"),
    (1_000_000, "ms"),
    (1_000, "us"),
    (1, "ns"),
];

/// The fixed spacing between consecutive timestamps of a series.
///
/// Always strictly positive. `Display` renders a compact alias such as
/// `D`, `3D`, `H` or `15min`; the stored value is the exact duration.
///
/// Weekly aliases are plain multiples of seven days (`W`, `2W`) and are not
/// anchored to a weekday the way calendar offsets such as `W-SUN` are.
///
/// ```
/// use chrono::TimeDelta;
/// use tempora_core::Frequency;
///
/// let f = Frequency::new(TimeDelta::minutes(15)).unwrap();
/// assert_eq!(f.to_string(), "15min");
/// assert_eq!(Frequency::new(TimeDelta::days(1)).unwrap().to_string(), "D");
/// assert!(Frequency::new(TimeDelta::zero()).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(TimeDelta);

impl Frequency {
    /// Wrap a step, returning `None` unless it is strictly positive.
    #[must_use]
    pub fn new(step: TimeDelta) -> Option<Self> {
        (step > TimeDelta::zero()).then_some(Self(step))
    }

    /// The step as a `TimeDelta`.
    #[must_use]
    pub const fn as_duration(self) -> TimeDelta {
        self.0
    }

    fn total_nanos(self) -> i128 {
        i128::from(self.0.num_seconds()) * NANOS_PER_SECOND + i128::from(self.0.subsec_nanos())
    }
}

impl From<Frequency> for TimeDelta {
    fn from(f: Frequency) -> Self {
        f.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.total_nanos();
        let (size, unit) = UNITS
            .iter()
            .copied()
            .find(|(size, _)| nanos % size == 0)
            .unwrap_or((1, "ns"));
        match nanos / size {
            1 => f.write_str(unit),
            n => write!(f, "{n}{unit}"),
        }
    }
}
