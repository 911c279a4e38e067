mod search;

pub use search::{SearchOptions, search};
