// Scan API: resume upload, batch ranking and ATS scoring over HTTP.
// Scoring itself lives in `ranking`; this module only validates and orchestrates.

pub mod handlers;
pub mod pipeline;
