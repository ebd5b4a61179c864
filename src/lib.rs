pub mod fake_round;
pub mod features;
pub mod forecast;
pub mod logistic;
pub mod model;
pub mod normalize;
pub mod render;
pub mod round;
pub mod rules;

pub use forecast::predict_round;
pub use model::{H2hLast5, Last5, MatchId, MatchInput, MatchOutput, Pick, Probs, TeamFeatures};
