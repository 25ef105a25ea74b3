// Application layer: orchestration of lookups plus console and CSV output.

pub mod engine;
pub mod report;
pub mod serials;
