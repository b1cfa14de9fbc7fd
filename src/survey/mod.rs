pub mod definition;

pub use definition::{Scale, SurveyDefinition};
