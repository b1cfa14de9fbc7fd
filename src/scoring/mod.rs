pub mod engine;

pub use engine::{compute, Answer, ScaleScore, TotalScore};
