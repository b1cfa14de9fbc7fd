//! tscore - psychometric questionnaire scoring
//!
//! Loads a survey definition (statements, scoring scales, normalization
//! constants) from a JSON document, validates it up front, and computes
//! per-scale raw scores and standardized T-scores for a respondent's
//! answers, applying the correction-scale adjustment where configured.

pub mod error;
pub mod output;
pub mod scoring;
pub mod survey;

pub use error::SurveyError;
pub use scoring::{compute, Answer, ScaleScore, TotalScore};
pub use survey::{Scale, SurveyDefinition};
