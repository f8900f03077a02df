pub mod ledger;
pub mod raffle;
pub mod subscription;

pub use ledger::*;
pub use raffle::*;
pub use subscription::*;
