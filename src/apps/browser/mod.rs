pub mod firefox;
pub mod vivaldi;
