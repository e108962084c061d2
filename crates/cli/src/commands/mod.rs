pub mod onboard;
pub mod prompt;
pub mod serve;
pub mod status;
