//! AppreciationEvent <-> AppreciationRow mapper

use credit_core::AppreciationEvent;

use crate::models::AppreciationRow;

impl From<AppreciationRow> for AppreciationEvent {
    fn from(row: AppreciationRow) -> Self {
        AppreciationEvent::new(row.timestamp, row.reactor_id, row.target)
    }
}

impl From<&AppreciationEvent> for AppreciationRow {
    fn from(event: &AppreciationEvent) -> Self {
        AppreciationRow {
            timestamp: event.timestamp,
            reactor_id: event.reactor_id,
            target: event.target.clone(),
        }
    }
}
