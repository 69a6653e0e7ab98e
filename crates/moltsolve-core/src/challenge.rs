//! Challenge solving: Text → Extraction → Composition

use crate::config::Config;
use crate::decode::{bracket_tokens, Answer, Composer, ExtractedValue, ValueExtractor};
use serde::Serialize;

/// Decoder built from configuration, reusable across challenges
#[derive(Debug, Clone, Default)]
pub struct Solver {
    extractor: ValueExtractor,
    composer: Composer,
}

impl Solver {
    pub fn new(config: &Config) -> Self {
        Self {
            extractor: ValueExtractor::new(config.matcher.clone(), config.extract.clone()),
            composer: Composer::new(config.composer.operation),
        }
    }

    /// Extract the evidence for one challenge
    pub fn challenge(&self, text: &str) -> Challenge {
        Challenge {
            text: text.to_string(),
            values: self.extractor.extract(text),
        }
    }

    /// Extract and compose in one go
    pub fn solve(&self, text: &str) -> Answer {
        self.challenge(text).answer(&self.composer)
    }

    /// Full breakdown of how a challenge was read
    pub fn report(&self, text: &str) -> ChallengeReport {
        let challenge = self.challenge(text);
        let answer = challenge.answer(&self.composer);
        ChallengeReport {
            raw: challenge.text.clone(),
            bracket_tokens: bracket_tokens(text).into_iter().map(String::from).collect(),
            values: challenge.values,
            answer,
        }
    }
}

/// One challenge text and the numbers found in it, in scan order
#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
    pub text: String,
    pub values: Vec<ExtractedValue>,
}

impl Challenge {
    pub fn answer(&self, composer: &Composer) -> Answer {
        composer.compose(&self.values)
    }
}

/// Serializable breakdown printed by `moltsolve parse`
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeReport {
    pub raw: String,
    pub bracket_tokens: Vec<String>,
    pub values: Vec<ExtractedValue>,
    pub answer: Answer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Provenance;

    #[test]
    fn test_challenge_keeps_text_and_values() {
        let challenge = Solver::default().challenge("answer is <17>");
        assert_eq!(challenge.text, "answer is <17>");
        assert_eq!(
            challenge.values,
            vec![
                ExtractedValue::new(Provenance::Bracket, 17),
                ExtractedValue::new(Provenance::Plain, 17),
            ]
        );
        assert_eq!(challenge.answer(&Composer::default()).to_string(), "17.00");
    }

    #[test]
    fn test_solve_uses_config() {
        let mut config = Config::default();
        config.extract.rejoin_fragments = false;
        assert_eq!(Solver::new(&config).solve("tWeN tY fIiV").to_string(), "5.00");
        assert_eq!(Solver::default().solve("tWeN tY fIiV").to_string(), "25.00");
    }

    #[test]
    fn test_report_json() {
        let report = Solver::default().report("swims <20> yards and <15> feet");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["raw"], "swims <20> yards and <15> feet");
        assert_eq!(json["bracket_tokens"], serde_json::json!(["20", "15"]));
        assert_eq!(json["values"][0], serde_json::json!({ "provenance": "bracket", "value": 20 }));
        assert_eq!(json["answer"], "35.00");
    }
}
