pub mod advice;
pub mod estimator;
pub mod market;
pub mod matching;

pub use advice::AdviceEngine;
pub use estimator::estimate;
pub use matching::match_score;
