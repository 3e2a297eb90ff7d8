// Read side: skill-match scoring and the candidate listing that uses it.

pub mod handlers;
pub mod listing;
pub mod scorer;
