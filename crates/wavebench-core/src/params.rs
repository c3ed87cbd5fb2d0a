//! Simulation parameters: defaults, safety bounds and consistency repair.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Loosely typed parameters as received from a request, keyed by name.
pub type RawParams = BTreeMap<String, Value>;

/// The closed set of recognised simulation quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Supply voltage (V).
    SupplyVoltage,
    /// Temperature (°C).
    Temperature,
    /// Input rise time (s).
    RiseTime,
    /// Input fall time (s).
    FallTime,
    /// Input pulse width (s).
    PulseWidth,
    /// Input pulse period (s).
    Period,
    /// Output load capacitance (F).
    LoadCapacitance,
    /// Transient time step (s).
    TimeStep,
    /// Transient stop time (s).
    StopTime,
}

impl Quantity {
    pub const ALL: [Quantity; 9] = [
        Quantity::SupplyVoltage,
        Quantity::Temperature,
        Quantity::RiseTime,
        Quantity::FallTime,
        Quantity::PulseWidth,
        Quantity::Period,
        Quantity::LoadCapacitance,
        Quantity::TimeStep,
        Quantity::StopTime,
    ];

    /// Request key for this quantity.
    pub fn key(self) -> &'static str {
        match self {
            Quantity::SupplyVoltage => "VDD",
            Quantity::Temperature => "TEMP",
            Quantity::RiseTime => "TR",
            Quantity::FallTime => "TF",
            Quantity::PulseWidth => "PW",
            Quantity::Period => "PER",
            Quantity::LoadCapacitance => "CLOAD",
            Quantity::TimeStep => "TSTEP",
            Quantity::StopTime => "TSTOP",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.key() == key)
    }

    /// Inclusive `(lo, hi)` safety bound.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Quantity::SupplyVoltage => (0.5, 5.0),
            Quantity::Temperature => (-40.0, 125.0),
            Quantity::RiseTime | Quantity::FallTime => (1e-13, 1e-8),
            Quantity::PulseWidth | Quantity::Period => (1e-12, 1e-2),
            Quantity::LoadCapacitance => (1e-16, 1e-11),
            Quantity::TimeStep => (1e-13, 1e-9),
            Quantity::StopTime => (1e-10, 5e-6),
        }
    }

    pub fn default_value(self) -> f64 {
        match self {
            Quantity::SupplyVoltage => 1.2,
            Quantity::Temperature => 25.0,
            Quantity::RiseTime | Quantity::FallTime => 1e-11,
            Quantity::PulseWidth => 5e-10,
            Quantity::Period => 1e-9,
            Quantity::LoadCapacitance => 5e-15,
            Quantity::TimeStep => 1e-12,
            Quantity::StopTime => 3e-9,
        }
    }
}

/// Normalized simulation parameters.
///
/// Every value lies within its [`Quantity::bounds`], `period >= pulse_width`
/// and `stop_time >= 3 * period`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimParams {
    #[serde(rename = "VDD")]
    pub supply_voltage: f64,
    #[serde(rename = "TEMP")]
    pub temperature: f64,
    #[serde(rename = "TR")]
    pub rise_time: f64,
    #[serde(rename = "TF")]
    pub fall_time: f64,
    #[serde(rename = "PW")]
    pub pulse_width: f64,
    #[serde(rename = "PER")]
    pub period: f64,
    #[serde(rename = "CLOAD")]
    pub load_capacitance: f64,
    #[serde(rename = "TSTEP")]
    pub time_step: f64,
    #[serde(rename = "TSTOP")]
    pub stop_time: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self::normalize(&RawParams::new())
    }
}

impl SimParams {
    /// Normalize a raw parameter mapping. Never fails.
    ///
    /// Each quantity is parsed from its entry (numbers, numeric strings and
    /// booleans are accepted), replaced by its default when missing or
    /// unparseable, and clamped to its bound. The timing chain is then
    /// repaired: a period shorter than the pulse width becomes twice the
    /// width, and a stop time shorter than three periods becomes three
    /// periods.
    pub fn normalize(raw: &RawParams) -> Self {
        let mut params = Self::from_fn(|q| {
            let (lo, hi) = q.bounds();
            raw.get(q.key())
                .and_then(coerce)
                .unwrap_or_else(|| q.default_value())
                .clamp(lo, hi)
        });
        params.repair();
        params
    }

    /// Value of one quantity.
    pub fn get(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::SupplyVoltage => self.supply_voltage,
            Quantity::Temperature => self.temperature,
            Quantity::RiseTime => self.rise_time,
            Quantity::FallTime => self.fall_time,
            Quantity::PulseWidth => self.pulse_width,
            Quantity::Period => self.period,
            Quantity::LoadCapacitance => self.load_capacitance,
            Quantity::TimeStep => self.time_step,
            Quantity::StopTime => self.stop_time,
        }
    }

    /// Convert back into a raw mapping, e.g. to re-normalize.
    pub fn to_raw(&self) -> RawParams {
        Quantity::ALL
            .into_iter()
            .map(|q| (q.key().to_string(), Value::from(self.get(q))))
            .collect()
    }

    fn from_fn(mut value: impl FnMut(Quantity) -> f64) -> Self {
        Self {
            supply_voltage: value(Quantity::SupplyVoltage),
            temperature: value(Quantity::Temperature),
            rise_time: value(Quantity::RiseTime),
            fall_time: value(Quantity::FallTime),
            pulse_width: value(Quantity::PulseWidth),
            period: value(Quantity::Period),
            load_capacitance: value(Quantity::LoadCapacitance),
            time_step: value(Quantity::TimeStep),
            stop_time: value(Quantity::StopTime),
        }
    }

    fn repair(&mut self) {
        if self.period < self.pulse_width {
            self.period = 2.0 * self.pulse_width;
        }
        if self.stop_time < 3.0 * self.period {
            self.stop_time = 3.0 * self.period;
        }
        self.fold_into_bounds();
    }

    /// Pull a repaired period or stop time back inside its bound while
    /// keeping `pulse_width <= period <= stop_time / 3`.
    fn fold_into_bounds(&mut self) {
        let (_, period_hi) = Quantity::Period.bounds();
        if self.period > period_hi {
            self.period = period_hi;
        }

        let (_, stop_hi) = Quantity::StopTime.bounds();
        if self.stop_time > stop_hi {
            self.stop_time = stop_hi;
            let mut period = self.period.min(stop_hi / 3.0);
            while 3.0 * period > self.stop_time {
                period *= 1.0 - f64::EPSILON;
            }
            self.period = period;
            self.pulse_width = self.pulse_width.min(period);
        }
    }
}

fn coerce(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|v| !v.is_nan())
}
