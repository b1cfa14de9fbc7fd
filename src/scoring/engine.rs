use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SurveyError;
use crate::survey::{Scale, SurveyDefinition};

/// One respondent's answer to one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    Unanswered,
}

impl Answer {
    /// Parse the compact answer notation: `y`/`n`/`-`, case insensitive.
    pub fn from_char(c: char) -> Option<Answer> {
        match c.to_ascii_lowercase() {
            'y' => Some(Answer::Yes),
            'n' => Some(Answer::No),
            '-' => Some(Answer::Unanswered),
            _ => None,
        }
    }
}

/// Raw and standardized result for one scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleScore {
    pub scale_name: String,
    pub initial_score: i32,
    pub t_score: f64,
}

/// The full score report: additional-scale results first, then primary,
/// each group in definition order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalScore {
    pub scales_results: Vec<ScaleScore>,
    pub unanswered: usize,
}

impl Scale {
    /// Score this scale against a full answer sequence.
    ///
    /// The raw score counts YES answers on positive-keyed statements and NO
    /// answers on negative-keyed statements; unanswered and wrong-direction
    /// answers contribute nothing, and duplicate indices count once per
    /// occurrence. The T-score is the linear transform
    /// `50 + 10 * (raw - mean) / variance + correction_t_score * correction`.
    ///
    /// Statement indices must be in range for `answers`; definitions built
    /// by [`SurveyDefinition::from_json`] guarantee this.
    pub fn compute(&self, answers: &[Answer], correction_t_score: f64) -> ScaleScore {
        let mut initial_score = 0;
        for &i in &self.positive {
            if answers[i] == Answer::Yes {
                initial_score += 1;
            }
        }
        for &i in &self.negative {
            if answers[i] == Answer::No {
                initial_score += 1;
            }
        }

        let t_score = 50.0 + 10.0 * (f64::from(initial_score) - self.mean) / self.variance
            + correction_t_score * self.correction;

        ScaleScore {
            scale_name: self.name.clone(),
            initial_score,
            t_score,
        }
    }
}

/// Score an answer sequence against a survey definition.
///
/// Additional scales are scored first, unadjusted. If the definition
/// designates a correction scale, its T-score then feeds into every primary
/// scale through that scale's own `correction` weight; the term flows from
/// additional to primary scales only. The answer sequence must cover every
/// statement exactly once.
pub fn compute(survey: &SurveyDefinition, answers: &[Answer]) -> Result<TotalScore, SurveyError> {
    let expected = survey.statement_count();
    if answers.len() != expected {
        return Err(SurveyError::AnswerCountMismatch {
            expected,
            actual: answers.len(),
        });
    }

    let unanswered = answers.iter().filter(|a| **a == Answer::Unanswered).count();

    let mut scales_results =
        Vec::with_capacity(survey.additional_scales().len() + survey.primary_scales().len());

    for scale in survey.additional_scales() {
        scales_results.push(scale.compute(answers, 0.0));
    }

    let correction_t_score = survey
        .correction_scale()
        .map_or(0.0, |i| scales_results[i].t_score);

    for scale in survey.primary_scales() {
        scales_results.push(scale.compute(answers, correction_t_score));
    }

    debug!(
        scales = scales_results.len(),
        unanswered, correction_t_score, "computed total score"
    );

    Ok(TotalScore {
        scales_results,
        unanswered,
    })
}
