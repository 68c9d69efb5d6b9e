pub mod export;
pub mod seed;

pub use export::{Exporter, LedgerSnapshot};
pub use seed::load_seed;
