//! Ohm's law for the single-resistor circuit.

use serde::Serialize;

/// Slider ranges the host should offer.
pub const VOLTAGE_RANGE: (f32, f32) = (0.0, 24.0);
pub const RESISTANCE_RANGE: (f32, f32) = (1.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircuitReading {
    pub voltage: f32,
    pub resistance: f32,
    /// Amperes. Zero when the resistance is not positive.
    pub current: f32,
    /// Watts.
    pub power: f32,
}

impl CircuitReading {
    /// Current with two decimals, e.g. `"2.00 A"`.
    pub fn current_label(&self) -> String {
        format!("{:.2} A", self.current)
    }

    pub fn power_label(&self) -> String {
        format!("{:.2} W", self.power)
    }
}

/// `I = V / R`. A non-positive (or NaN) resistance yields zero current
/// instead of an infinity.
pub fn ohms_law(voltage: f32, resistance: f32) -> CircuitReading {
    let current = if resistance > 0.0 && voltage.is_finite() { voltage / resistance } else { 0.0 };
    CircuitReading {
        voltage,
        resistance,
        current,
        power: if current == 0.0 { 0.0 } else { voltage * current },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_volts_across_five_ohms() {
        let r = ohms_law(10.0, 5.0);
        assert_eq!(r.current, 2.0);
        assert_eq!(r.current_label(), "2.00 A");
        assert_eq!(r.power, 20.0);
        assert_eq!(r.power_label(), "20.00 W");
    }

    #[test]
    fn zero_resistance_gives_zero_current() {
        let r = ohms_law(10.0, 0.0);
        assert_eq!(r.current, 0.0);
        assert_eq!(r.current_label(), "0.00 A");
        assert_eq!(r.power, 0.0);
    }

    #[test]
    fn hostile_inputs_stay_finite() {
        assert_eq!(ohms_law(10.0, -4.0).current, 0.0);
        assert_eq!(ohms_law(10.0, f32::NAN).current, 0.0);
        assert_eq!(ohms_law(f32::INFINITY, 2.0).current, 0.0);
    }

    #[test]
    fn slider_extremes_stay_finite() {
        let max = ohms_law(VOLTAGE_RANGE.1, RESISTANCE_RANGE.0);
        assert_eq!(max.current, 24.0);
        assert_eq!(max.power_label(), "576.00 W");
        assert_eq!(ohms_law(VOLTAGE_RANGE.0, RESISTANCE_RANGE.1).current, 0.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(ohms_law(1.0, 3.0).current_label(), "0.33 A");
    }
}
