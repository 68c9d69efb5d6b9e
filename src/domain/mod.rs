mod error;
mod friend;
mod ledger;
mod money;
mod split;

pub use error::*;
pub use friend::*;
pub use ledger::*;
pub use money::*;
pub use split::*;
