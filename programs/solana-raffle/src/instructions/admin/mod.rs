pub mod init_raffle;
pub mod subscription;

pub use init_raffle::*;
pub use subscription::*;
