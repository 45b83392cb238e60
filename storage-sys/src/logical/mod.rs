pub mod lvm_tools;

pub use lvm_tools::{parse_report, query_lvm, report_args, validate_filter, validate_unit};
