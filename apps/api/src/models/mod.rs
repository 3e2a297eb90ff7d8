pub mod candidate;
pub mod entities;
pub mod job;
