pub mod stdio;
pub mod tooling;
