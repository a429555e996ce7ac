pub mod lead_scoring;
