//! Body-weight store and weight-entry helpers.

use crate::{DateKey, Error, Result, WeightLog};

/// Weight offered when no sample exists on or before the day
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// Increment used by the weight entry stepper
pub const DEFAULT_WEIGHT_STEP_KG: f64 = 0.5;

impl WeightLog {
    /// Return a copy of the log with `kg` stored for `date`
    ///
    /// Overwrites any earlier sample for the same day. Values that are not
    /// finite and positive are rejected and the log is left as it was.
    pub fn with_weight(&self, date: &DateKey, kg: f64) -> Result<WeightLog> {
        let kg = validate_weight(kg)?;

        let mut next = self.clone();
        next.insert(date.clone(), kg);
        tracing::debug!("Recorded weight {} kg on {}", kg, date);
        Ok(next)
    }

    /// Sample for `before_or_on`, else the closest earlier sample, else 70 kg
    pub fn latest_known_weight(&self, before_or_on: &DateKey) -> f64 {
        self.latest_known_weight_or(before_or_on, DEFAULT_WEIGHT_KG)
    }

    pub fn latest_known_weight_or(&self, before_or_on: &DateKey, fallback: f64) -> f64 {
        self.range_up_to(before_or_on)
            .next_back()
            .map(|(_, kg)| *kg)
            .unwrap_or(fallback)
    }
}

/// Accept only finite, strictly positive weights
pub fn validate_weight(kg: f64) -> Result<f64> {
    if kg.is_finite() && kg > 0.0 {
        Ok(kg)
    } else {
        Err(Error::InvalidWeight(format!("{} is not a positive number", kg)))
    }
}

/// Parse free-text weight entry ("72.5", " 72,5 ")
pub fn parse_weight_input(text: &str) -> Result<f64> {
    let normalized = text.trim().replace(',', ".");
    let kg = normalized
        .parse::<f64>()
        .map_err(|_| Error::InvalidWeight(format!("'{}' is not a number", text.trim())))?;
    validate_weight(kg)
}

/// Apply a stepper press to the entry text
///
/// Unparseable text counts as zero and the result never drops below zero.
/// The returned text always carries one decimal place.
pub fn adjust_weight_input(text: &str, delta: f64) -> String {
    let current = text
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|kg| kg.is_finite())
        .unwrap_or(0.0);

    format!("{:.1}", (current + delta).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::from(s)
    }

    #[test]
    fn test_rejects_non_positive_and_nan() {
        let log = WeightLog::default();
        for bad in [-5.0, 0.0, f64::NAN, f64::INFINITY] {
            let result = log.with_weight(&key("2024-01-01"), bad);
            assert!(matches!(result, Err(Error::InvalidWeight(_))), "{}", bad);
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_accepts_and_overwrites_same_day() {
        let date = key("2024-01-01");
        let log = WeightLog::default().with_weight(&date, 72.0).unwrap();
        let log = log.with_weight(&date, 70.5).unwrap();

        assert_eq!(log.len(), 1);
        assert_eq!(log.get(&date), Some(70.5));
    }

    #[test]
    fn test_latest_known_prefers_exact_day() {
        let log = WeightLog::default()
            .with_weight(&key("2024-01-01"), 80.0)
            .unwrap()
            .with_weight(&key("2024-01-05"), 78.0)
            .unwrap();

        assert_eq!(log.latest_known_weight(&key("2024-01-05")), 78.0);
    }

    #[test]
    fn test_latest_known_falls_back_to_earlier_day() {
        let log = WeightLog::default()
            .with_weight(&key("2024-01-01"), 80.0)
            .unwrap()
            .with_weight(&key("2024-01-03"), 79.0)
            .unwrap()
            .with_weight(&key("2024-01-10"), 77.0)
            .unwrap();

        assert_eq!(log.latest_known_weight(&key("2024-01-07")), 79.0);
    }

    #[test]
    fn test_latest_known_default_when_nothing_earlier() {
        let log = WeightLog::default()
            .with_weight(&key("2024-02-01"), 80.0)
            .unwrap();

        assert_eq!(log.latest_known_weight(&key("2024-01-15")), DEFAULT_WEIGHT_KG);
        assert_eq!(WeightLog::default().latest_known_weight(&key("2024-01-15")), 70.0);
    }

    #[test]
    fn test_parse_weight_input() {
        assert_eq!(parse_weight_input("72.5").unwrap(), 72.5);
        assert_eq!(parse_weight_input(" 72,5 ").unwrap(), 72.5);
        assert!(parse_weight_input("").is_err());
        assert!(parse_weight_input("abc").is_err());
        assert!(parse_weight_input("-1").is_err());
        assert!(parse_weight_input("0").is_err());
    }

    #[test]
    fn test_adjust_weight_input() {
        assert_eq!(adjust_weight_input("70", DEFAULT_WEIGHT_STEP_KG), "70.5");
        assert_eq!(adjust_weight_input("70.5", -DEFAULT_WEIGHT_STEP_KG), "70.0");
        assert_eq!(adjust_weight_input("", 0.5), "0.5");
        assert_eq!(adjust_weight_input("0.2", -0.5), "0.0");
    }
}
