mod config;

pub use config::{get_github_token, load_config, save_config, Config};
