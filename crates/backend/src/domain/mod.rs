pub mod a001_indicator;
pub mod a002_indicator_value;
pub mod a003_squad;
pub mod a004_professional;
pub mod a005_job_role;
pub mod a006_import_batch;
