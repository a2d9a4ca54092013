pub mod files;
pub mod http_client;
