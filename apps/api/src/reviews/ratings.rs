//! Rating math and validation, shared by both review directions.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const MIN_SCORE: i16 = 1;
pub const MAX_SCORE: i16 = 5;

/// The five category scores every review carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub punctuality: i16,
    pub quality: i16,
    pub communication: i16,
    pub value_for_money: i16,
    pub professionalism: i16,
}

impl ScoreCard {
    fn scores(&self) -> [i16; 5] {
        [
            self.punctuality,
            self.quality,
            self.communication,
            self.value_for_money,
            self.professionalism,
        ]
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for score in self.scores() {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(AppError::Validation(format!(
                    "Scores must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
                )));
            }
        }
        Ok(())
    }

    /// Arithmetic mean of the five scores.
    pub fn average(&self) -> f64 {
        let sum: i16 = self.scores().iter().sum();
        f64::from(sum) / 5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(scores: [i16; 5]) -> ScoreCard {
        ScoreCard {
            punctuality: scores[0],
            quality: scores[1],
            communication: scores[2],
            value_for_money: scores[3],
            professionalism: scores[4],
        }
    }

    #[test]
    fn test_all_fives_average() {
        let c = card([5, 5, 5, 5, 5]);
        c.validate().unwrap();
        assert_eq!(c.average(), 5.0);
    }

    #[test]
    fn test_mixed_average() {
        let c = card([4, 5, 3, 4, 5]);
        assert_eq!(c.average(), 4.2);
    }

    #[test]
    fn test_boundary_scores_valid() {
        card([1, 1, 1, 1, 1]).validate().unwrap();
        card([5, 5, 5, 5, 5]).validate().unwrap();
    }

    #[test]
    fn test_zero_score_rejected() {
        let err = card([0, 5, 5, 5, 5]).validate().unwrap_err();
        assert!(err.to_string().contains("got 0"));
    }

    #[test]
    fn test_six_rejected() {
        assert!(card([5, 5, 6, 5, 5]).validate().is_err());
    }

    #[test]
    fn test_negative_rejected() {
        assert!(card([5, -1, 5, 5, 5]).validate().is_err());
    }
}
