//! Live operations console: the ordered session transcript, the output
//! aggregator that feeds it, and the command relay that echoes into it.

pub mod aggregator;
pub mod relay;
pub mod session;

pub use aggregator::LogAggregator;
pub use relay::CommandRelay;
pub use session::ConsoleSession;
