pub mod completions;
pub mod trim;
