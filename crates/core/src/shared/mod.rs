pub mod constants;
pub mod lenient_string;
