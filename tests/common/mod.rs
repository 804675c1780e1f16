//! Common test utilities

#![allow(dead_code)]

use rust_decimal::Decimal;
use wallet_ledger::Ledger;

pub const ALICE: &str = "alice@example.com";
pub const BOB: &str = "bob@example.com";
pub const PIN: &str = "1234";

/// Ledger with Alice and Bob registered but not logged in
pub fn setup_ledger(alice_balance: Decimal, bob_balance: Decimal) -> Ledger {
    let mut ledger = Ledger::new();
    ledger
        .register("Alice", ALICE, PIN, alice_balance)
        .expect("Failed to register Alice");
    ledger
        .register("Bob", BOB, PIN, bob_balance)
        .expect("Failed to register Bob");
    ledger
}

/// Ledger with Alice and Bob registered and logged in
pub fn setup_logged_in(alice_balance: Decimal, bob_balance: Decimal) -> Ledger {
    let mut ledger = setup_ledger(alice_balance, bob_balance);
    ledger.authenticate(ALICE, PIN).expect("Alice login failed");
    ledger.authenticate(BOB, PIN).expect("Bob login failed");
    ledger
}

/// Run `op` and assert it failed without touching the store
pub fn assert_rejected_unchanged<T: std::fmt::Debug>(
    ledger: &mut Ledger,
    op: impl FnOnce(&mut Ledger) -> Result<T, wallet_ledger::LedgerError>,
) -> wallet_ledger::LedgerError {
    let before = ledger.snapshot().expect("snapshot before");
    let err = op(ledger).expect_err("operation should have been rejected");
    let after = ledger.snapshot().expect("snapshot after");
    assert_eq!(before, after, "store changed on rejected operation: {}", err);
    err
}
