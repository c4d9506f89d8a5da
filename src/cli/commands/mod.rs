pub mod backfill;
pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod override_day;
pub mod report;
pub mod serve;
pub mod today;
pub mod week;
