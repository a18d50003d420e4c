//! Scoped write unit over SQLite transactions.
//!
//! # Invariants
//! - Writers take the database write lock up front (`BEGIN IMMEDIATE`).
//! - The unit commits only when the closure returns `Ok`; any `Err`, or an
//!   unwind through the closure, rolls every statement back.

use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Runs `work` inside one all-or-nothing transaction.
pub fn write_unit<T, E, F>(conn: &mut Connection, work: F) -> Result<T, E>
where
    E: From<rusqlite::Error>,
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    // Dropping `tx` without commit rolls back.
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}
