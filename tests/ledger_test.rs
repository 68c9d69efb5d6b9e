mod common;

use std::collections::HashSet;

use anyhow::Result;
use common::{balance_of, balances, test_service};
use splitbill::application::{AppError, LedgerService};
use splitbill::domain::{LedgerError, Payer};
use uuid::Uuid;

#[test]
fn test_add_friend_grows_ledger_with_unique_ids() -> Result<()> {
    let mut service = test_service();
    let mut seen: HashSet<Uuid> = service.list_friends().iter().map(|f| f.id).collect();

    for (i, name) in ["Dana", "Eli", "Farah", "Gus"].iter().enumerate() {
        let before = service.list_friends().len();
        let friend = service.add_friend(name, "https://i.pravatar.cc/48")?;

        assert_eq!(service.list_friends().len(), before + 1);
        assert_eq!(friend.balance, 0);
        assert!(seen.insert(friend.id), "id reused on insert {}", i);
    }

    // Existing records untouched
    assert_eq!(balances(&service)[..3], [-700, 2000, 0]);
    Ok(())
}

#[test]
fn test_add_friend_empty_fields_rejected() {
    let mut service = test_service();

    let err = service.add_friend("", "img").unwrap_err();
    assert!(err.is_invalid_input());
    let err = service.add_friend("Dana", "").unwrap_err();
    assert!(err.is_invalid_input());

    assert_eq!(service.list_friends().len(), 3);
}

#[test]
fn test_select_twice_returns_friend_then_none() -> Result<()> {
    let mut service = test_service();

    let first = service.select_friend("Sarah")?;
    let second = service.select_friend("Sarah")?;

    assert_eq!(first.map(|f| f.name), Some("Sarah".to_string()));
    assert!(second.is_none());
    assert!(service.selected().is_none());
    Ok(())
}

#[test]
fn test_clark_scenario_user_pays() -> Result<()> {
    let mut service = test_service();

    let result = service.split_bill("Clark", 5000, 2000, Payer::User)?;

    assert_eq!(result.delta, 3000);
    assert_eq!(result.friend.balance, 2300);
    assert_eq!(balance_of(&service, "Clark"), 2300);
    Ok(())
}

#[test]
fn test_sarah_scenario_friend_pays() -> Result<()> {
    let mut service = test_service();

    let result = service.split_bill("Sarah", 4000, 1000, Payer::Friend)?;

    assert_eq!(result.delta, -1000);
    assert_eq!(balance_of(&service, "Sarah"), 1000);
    Ok(())
}

#[test]
fn test_split_formulas_hold_across_inputs() -> Result<()> {
    let cases = [
        (1, 0),
        (1, 1),
        (999, 333),
        (10000, 0),
        (10000, 10000),
        (12345, 6789),
    ];

    for (total, user_expense) in cases {
        let mut service = test_service();
        let before = balance_of(&service, "Anthony");
        service.split_bill("Anthony", total, user_expense, Payer::User)?;
        assert_eq!(
            balance_of(&service, "Anthony"),
            before + (total - user_expense)
        );

        let before = balance_of(&service, "Clark");
        service.split_bill("Clark", total, user_expense, Payer::Friend)?;
        assert_eq!(balance_of(&service, "Clark"), before - user_expense);
    }
    Ok(())
}

#[test]
fn test_user_covers_whole_bill_leaves_balance() -> Result<()> {
    let mut service = test_service();

    let result = service.split_bill("Sarah", 4000, 4000, Payer::User)?;

    assert_eq!(result.delta, 0);
    assert_eq!(balance_of(&service, "Sarah"), 2000);
    Ok(())
}

#[test]
fn test_invalid_split_leaves_balances_unchanged() {
    let mut service = test_service();
    let before = balances(&service);

    for (total, user_expense) in [(0, 0), (-500, 0), (1000, -1), (1000, 1001)] {
        let err = service
            .split_bill("Clark", total, user_expense, Payer::User)
            .unwrap_err();
        assert!(
            matches!(err, AppError::Ledger(LedgerError::InvalidInput(_))),
            "total {} expense {} gave {:?}",
            total,
            user_expense,
            err
        );
    }

    assert_eq!(balances(&service), before);
}

#[test]
fn test_unknown_friend_is_not_found() {
    let mut service = test_service();
    let before = balances(&service);
    let missing = Uuid::new_v4().to_string();

    assert!(service.select_friend(&missing).unwrap_err().is_not_found());
    assert!(
        service
            .split_bill("Zed", 1000, 500, Payer::Friend)
            .unwrap_err()
            .is_not_found()
    );

    assert_eq!(balances(&service), before);
    assert!(service.selected().is_none());
}

#[test]
fn test_split_clears_selection_only_on_success() -> Result<()> {
    let mut service = test_service();
    service.select_friend("Clark")?;

    assert!(service.split_selected(1000, 2000, Payer::User).is_err());
    assert_eq!(service.selected().map(|f| f.name.as_str()), Some("Clark"));

    service.split_selected(1000, 200, Payer::User)?;
    assert!(service.selected().is_none());
    assert_eq!(balance_of(&service, "Clark"), 100);
    Ok(())
}

#[test]
fn test_ledger_usable_after_rejections() -> Result<()> {
    let mut service = LedgerService::empty();

    assert!(service.add_friend(" ", "img").is_err());
    assert!(service.select_friend("nobody").is_err());
    assert!(matches!(
        service.split_selected(100, 0, Payer::User),
        Err(AppError::NoSelection)
    ));

    service.add_friend("Dana", "img")?;
    service.select_friend("dana")?;
    let result = service.split_selected(3000, 1000, Payer::User)?;

    assert_eq!(result.friend.balance, 2000);
    Ok(())
}
