//! Domain types for the test-job pipeline

pub mod commit;
pub mod deliverable;
pub mod descriptor;
pub mod push;
pub mod result;
pub mod user;
