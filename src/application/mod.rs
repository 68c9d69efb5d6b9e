// Application layer - use cases on top of the balance ledger.
// Clients (the CLI session, tests) talk to the ledger through LedgerService,
// which resolves friends by name or id and logs every mutation.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
