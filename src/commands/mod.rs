pub mod init;
pub mod run;

pub use init::cmd_init;
pub use run::cmd_run;
