//! Display-unit selection for a chart's pointset.

/// A display unit: the label shown on the dashboard and the divisor
/// applied to raw nanosecond values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    /// Human-readable unit label.
    pub label: &'static str,
    /// Nanoseconds per unit.
    pub divisor: f64,
}

/// Candidate units, coarsest first.
const UNITS: [Unit; 4] = [
    Unit { label: "seconds (s)", divisor: 1e9 },
    Unit { label: "millis (ms)", divisor: 1e6 },
    Unit { label: "micros (us)", divisor: 1e3 },
    Unit { label: "nanos (ns)", divisor: 1.0 },
];

/// Pick the coarsest unit whose divisor is strictly below every value in
/// the pointset, so the smallest scaled value still exceeds one unit.
///
/// One unit is chosen per chart and applied uniformly to all lines and
/// revisions. When no divisor qualifies (empty pointset, all-zero data,
/// or a sub-nanosecond minimum) the result is nanoseconds.
pub fn normalized_unit(values: impl IntoIterator<Item = f64>) -> Unit {
    let mut minimal = f64::INFINITY;
    let mut seen = false;
    for value in values {
        minimal = minimal.min(value);
        seen = true;
    }
    if !seen {
        return UNITS[3];
    }
    UNITS
        .iter()
        .copied()
        .find(|unit| unit.divisor < minimal)
        .unwrap_or(UNITS[3])
}
