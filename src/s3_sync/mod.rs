pub mod error_log;
pub mod s3_sync_completion;
pub mod s3_sync_data_unit;
pub mod s3_sync_error;
pub mod s3_sync_line;
pub mod s3_sync_report;
pub mod s3_sync_status;
pub mod tail;
