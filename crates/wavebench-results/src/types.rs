//! Waveform container.

use indexmap::IndexMap;
use serde::Serialize;

/// Sampled node voltages sharing one time axis.
///
/// Channels are keyed by label in request order; every channel has the same
/// length as `time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Waveform {
    /// Time values.
    pub time: Vec<f64>,
    /// Values for each label at each time point.
    pub channels: IndexMap<String, Vec<f64>>,
}

impl Waveform {
    /// Create an empty waveform with one channel per distinct label.
    ///
    /// A label given more than once keeps only its first slot.
    pub fn with_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut channels = IndexMap::with_capacity(labels.len());
        for label in labels {
            channels
                .entry(label.as_ref().to_string())
                .or_insert_with(Vec::new);
        }
        Self {
            time: Vec::new(),
            channels,
        }
    }

    /// Number of time points.
    pub fn points(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Values of one channel.
    pub fn channel(&self, label: &str) -> Option<&[f64]> {
        self.channels.get(label).map(Vec::as_slice)
    }

    /// Channel labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    /// Append one sample; `values[i]` belongs to the `i`-th channel.
    pub(crate) fn push_row(&mut self, time: f64, values: &[f64]) {
        debug_assert_eq!(values.len(), self.channels.len());
        self.time.push(time);
        for (series, value) in self.channels.values_mut().zip(values) {
            series.push(*value);
        }
    }

    /// Sample a channel at `time` by linear interpolation.
    ///
    /// Times before the first or after the last sample return the boundary
    /// value.
    pub fn value_at(&self, label: &str, time: f64) -> Option<f64> {
        let vals = self.channels.get(label)?;
        let (&first, &last) = (self.time.first()?, self.time.last()?);
        if vals.is_empty() {
            return None;
        }

        if time <= first {
            return vals.first().copied();
        }
        if time >= last {
            return vals.last().copied();
        }

        // Find interval and interpolate
        let i = self
            .time
            .windows(2)
            .position(|w| time >= w[0] && time <= w[1])?;
        let (t0, t1) = (self.time[i], self.time[i + 1]);
        if t1 == t0 {
            return Some(vals[i]);
        }
        let alpha = (time - t0) / (t1 - t0);
        Some(vals[i] * (1.0 - alpha) + vals[i + 1] * alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Waveform {
        let mut w = Waveform::with_labels(&["v(a)", "v(y)"]);
        w.push_row(0.0, &[0.0, 1.0]);
        w.push_row(1.0, &[1.0, 0.0]);
        w.push_row(3.0, &[1.0, 2.0]);
        w
    }

    #[test]
    fn test_with_labels_dedupes() {
        let w = Waveform::with_labels(&["v(a)", "v(y)", "v(a)"]);
        assert_eq!(w.labels().collect::<Vec<_>>(), ["v(a)", "v(y)"]);
        assert!(w.is_empty());
    }

    #[test]
    fn test_interpolation() {
        let w = ramp();
        assert_eq!(w.points(), 3);
        assert_eq!(w.value_at("v(a)", 0.5), Some(0.5));
        assert_eq!(w.value_at("v(y)", 2.0), Some(1.0));
        assert_eq!(w.value_at("v(y)", 1.0), Some(0.0));
    }

    #[test]
    fn test_interpolation_clamps() {
        let w = ramp();
        assert_eq!(w.value_at("v(a)", -1.0), Some(0.0));
        assert_eq!(w.value_at("v(y)", 10.0), Some(2.0));
        assert_eq!(w.value_at("v(z)", 1.0), None);
        assert_eq!(Waveform::with_labels(&["v(a)"]).value_at("v(a)", 0.0), None);
    }

    #[test]
    fn test_serializes_in_label_order() {
        let json = serde_json::to_string(&ramp()).unwrap();
        assert_eq!(
            json,
            r#"{"time":[0.0,1.0,3.0],"channels":{"v(a)":[0.0,1.0,1.0],"v(y)":[1.0,0.0,2.0]}}"#
        );
    }
}
