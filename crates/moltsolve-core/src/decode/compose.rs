//! Answer composition
//!
//! Picks the two most trusted distinct values out of the extracted evidence
//! and combines them. Never fails: no evidence gives 0.00.

use super::extract::ExtractedValue;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Values combined into one answer
const OPERANDS: usize = 2;

/// How the selected values are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Sum,
}

impl Operation {
    pub fn apply(self, operands: &[i64]) -> f64 {
        match self {
            Self::Sum => operands.iter().map(|&v| v as f64).sum(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
        }
    }
}

/// A final answer, rounded to two decimals
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Answer(f64);

impl Answer {
    pub const ZERO: Answer = Answer(0.0);

    /// Round half away from zero to two decimals
    pub fn new(value: f64) -> Self {
        Self((value * 100.0).round() / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Serialized the way the verification endpoint wants it: "35.00"
impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Selects operands from extracted values and combines them
#[derive(Debug, Clone, Copy, Default)]
pub struct Composer {
    operation: Operation,
}

impl Composer {
    pub fn new(operation: Operation) -> Self {
        Self { operation }
    }

    pub fn compose(&self, values: &[ExtractedValue]) -> Answer {
        let operands = select_operands(values);
        if operands.is_empty() {
            tracing::debug!("No numeric evidence, answering {}", Answer::ZERO);
            return Answer::ZERO;
        }

        let answer = Answer::new(self.operation.apply(&operands));
        tracing::debug!(
            "Operands {:?} ({}) -> {}",
            operands,
            self.operation.display_name(),
            answer
        );
        answer
    }
}

/// First two distinct values in priority order (bracket, compound, plain,
/// word/single). The sort is stable so scan order breaks ties. Ranking only
/// reorders, so when fewer than two distinct values come out there are no
/// others left in the unsorted input either.
pub fn select_operands(values: &[ExtractedValue]) -> Vec<i64> {
    let mut ranked = values.to_vec();
    ranked.sort_by_key(|v| v.provenance.priority());

    let mut operands: Vec<i64> = Vec::with_capacity(OPERANDS);
    for candidate in &ranked {
        if operands.len() == OPERANDS {
            break;
        }
        if !operands.contains(&candidate.value) {
            operands.push(candidate.value);
        }
    }
    operands
}

/// Compose with the default operation
pub fn compose_answer(values: &[ExtractedValue]) -> Answer {
    Composer::default().compose(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::extract::Provenance;

    fn ev(provenance: Provenance, value: i64) -> ExtractedValue {
        ExtractedValue::new(provenance, value)
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(compose_answer(&[]), Answer::ZERO);
        assert_eq!(compose_answer(&[]).to_string(), "0.00");
    }

    #[test]
    fn test_single_value() {
        let answer = compose_answer(&[ev(Provenance::Plain, 42), ev(Provenance::Word, 42)]);
        assert_eq!(answer.to_string(), "42.00");
    }

    #[test]
    fn test_sum_of_two() {
        let answer = compose_answer(&[ev(Provenance::Bracket, 20), ev(Provenance::Bracket, 15)]);
        assert_eq!(answer.to_string(), "35.00");
    }

    #[test]
    fn test_priority_beats_scan_order() {
        let values = [
            ev(Provenance::Single, 3),
            ev(Provenance::Plain, 7),
            ev(Provenance::Bracket, 20),
            ev(Provenance::Compound, 25),
        ];
        assert_eq!(select_operands(&values), vec![20, 25]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let values = [
            ev(Provenance::Bracket, 20),
            ev(Provenance::Plain, 20),
            ev(Provenance::Plain, 20),
            ev(Provenance::Single, 4),
        ];
        assert_eq!(select_operands(&values), vec![20, 4]);
        assert_eq!(compose_answer(&values).to_string(), "24.00");
    }

    #[test]
    fn test_one_distinct_value_across_scans() {
        let values = [
            ev(Provenance::Single, 17),
            ev(Provenance::Plain, 17),
            ev(Provenance::Bracket, 17),
        ];
        assert_eq!(select_operands(&values), vec![17]);
        assert_eq!(compose_answer(&values).to_string(), "17.00");
    }

    #[test]
    fn test_only_first_two_used() {
        let values = [
            ev(Provenance::Bracket, 1),
            ev(Provenance::Bracket, 2),
            ev(Provenance::Bracket, 3),
        ];
        assert_eq!(compose_answer(&values).to_string(), "3.00");
    }

    #[test]
    fn test_deterministic() {
        let values = [
            ev(Provenance::Word, 9),
            ev(Provenance::Plain, 14),
            ev(Provenance::Compound, 33),
        ];
        let first = compose_answer(&values);
        for _ in 0..10 {
            assert_eq!(compose_answer(&values), first);
        }
    }

    #[test]
    fn test_answer_rounding() {
        assert_eq!(Answer::new(1.466).to_string(), "1.47");
        assert_eq!(Answer::new(0.125).value(), 0.13);
        assert_eq!(Answer::new(-2.5).to_string(), "-2.50");
    }

    #[test]
    fn test_answer_serializes_as_string() {
        let json = serde_json::to_string(&Answer::new(35.0)).unwrap();
        assert_eq!(json, "\"35.00\"");
    }

    #[test]
    fn test_operation_serde() {
        let op: Operation = serde_json::from_str("\"sum\"").unwrap();
        assert_eq!(op, Operation::Sum);
        assert_eq!(Operation::Sum.apply(&[2, 3]), 5.0);
        assert_eq!(Operation::Sum.apply(&[]), 0.0);
    }
}
