pub mod arch;
pub mod archive;
pub mod cmd;
pub mod config;
pub mod distro;
pub mod host;
pub mod html;
pub mod network;
pub mod package;
pub mod paths;
pub mod progress;
