pub mod generate_report_use_case;
pub mod report_logger;
