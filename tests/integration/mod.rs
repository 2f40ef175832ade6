//! Integration tests for querypipe.

pub mod codec_test;
pub mod engine_test;
pub mod metadata_test;
pub mod pipeline_test;
pub mod report_test;
