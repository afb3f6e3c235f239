pub mod constants;
pub mod http;
