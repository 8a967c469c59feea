// Domain layer - First-pass records and the keyframe heuristic

pub mod model;
pub mod rules;
