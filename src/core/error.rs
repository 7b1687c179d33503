/// Failures of the price-duration pipeline.
#[derive(Clone, Debug, PartialEq, derive_more::Display, derive_more::Error)]
pub enum CoreError {
    #[display("invalid period `{duration}` `{time}`: {reason}")]
    InvalidPeriod { duration: String, time: String, reason: String },

    #[display("no price observations to build a duration curve from")]
    EmptySeries,

    #[display(
        "cannot fit a degree-{degree} curve to {n_distinct} distinct durations ({n_points} points)"
    )]
    DegenerateFit { degree: usize, n_points: usize, n_distinct: usize },

    #[display("the solver has exhausted {n_iterations} iterations without converging")]
    SolverDidNotConverge { n_iterations: usize },

    #[display("no observed points within {start:.2}%..{end:.2}%")]
    IntegrationWindowEmpty { start: f64, end: f64 },
}

impl CoreError {
    pub fn invalid_period(duration: &str, time: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            duration: duration.to_owned(),
            time: time.to_owned(),
            reason: reason.into(),
        }
    }
}
