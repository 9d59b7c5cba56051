pub mod dispatch;
pub mod repl;
pub mod status;
