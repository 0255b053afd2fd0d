/// Errors produced by the `hero-core` crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A strength value was not one of `Weak`, `Average` or `Strong`.
    #[error("invalid strength '{value}': expected one of Weak, Average, Strong")]
    InvalidStrength { value: String },

    /// A power description was shorter than the required minimum.
    #[error("description has {length} characters; at least {minimum} are required")]
    DescriptionTooShort { length: usize, minimum: usize },
}
