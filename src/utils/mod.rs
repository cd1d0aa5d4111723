mod command;
mod config;
mod download;

pub use command::CommandExecutor;
pub use config::Config;
pub use download::http_download;
