pub mod init;
pub mod migrate;

pub use init::init_config;
pub use migrate::{migrate, MigrateCommand};
