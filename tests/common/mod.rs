// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use splitbill::application::LedgerService;
use splitbill::cli::Session;
use splitbill::domain::Cents;

/// Helper to create a service seeded with Clark (-7), Sarah (20) and Anthony (0)
pub fn test_service() -> LedgerService {
    LedgerService::with_default_friends()
}

/// Current balance of a friend looked up by name
pub fn balance_of(service: &LedgerService, name: &str) -> Cents {
    service.find_friend(name).unwrap().balance
}

/// All balances in display order
pub fn balances(service: &LedgerService) -> Vec<Cents> {
    service.list_friends().iter().map(|f| f.balance).collect()
}

/// Run a scripted session and return everything it printed
pub fn run_script(service: LedgerService, script: &str) -> (Session, String) {
    let mut session = Session::new(service);
    let mut out = Vec::new();
    session.run(script.as_bytes(), &mut out).unwrap();
    (session, String::from_utf8(out).unwrap())
}
