//! UserRecord <-> UserRow mapper

use credit_core::{LedgerTable, UserRecord};

use crate::models::{LedgerDocument, UserRow};

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            user_id: row.user_id,
            handle: row.handle,
            first_name: row.first_name,
            last_name: row.last_name,
            rating: row.rating,
        }
    }
}

impl From<&UserRecord> for UserRow {
    fn from(record: &UserRecord) -> Self {
        UserRow {
            user_id: record.user_id,
            handle: record.handle.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            rating: record.rating,
        }
    }
}

impl From<LedgerDocument> for LedgerTable {
    fn from(document: LedgerDocument) -> Self {
        LedgerTable::new(document.users.into_iter().map(UserRecord::from).collect())
    }
}

impl From<&LedgerTable> for LedgerDocument {
    fn from(table: &LedgerTable) -> Self {
        LedgerDocument {
            users: table.records().iter().map(UserRow::from).collect(),
            ..LedgerDocument::default()
        }
    }
}
