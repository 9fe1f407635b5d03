pub mod earthquake;
pub mod query;

pub use earthquake::Earthquake;
pub use query::FeedQuery;
