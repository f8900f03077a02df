pub mod view_raffle;

pub use view_raffle::*;
