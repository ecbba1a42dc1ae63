pub mod info;
pub mod init;
pub mod plot;
pub mod presets;
pub mod run;
pub mod setup;
pub mod validate;
