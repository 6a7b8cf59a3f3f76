mod extract;
mod watch;

pub use extract::run_extract;
pub use watch::run_watch;
