//! Terminal output: theme, reporter implementation and summary rendering.

pub mod output;
pub mod summary;
pub mod theme;

pub use output::Output;
pub use theme::Theme;
