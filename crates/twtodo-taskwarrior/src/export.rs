//! Parsing of `task export` output.

use serde_json::{Map, Value};
use twtodo_core::{timestamp, IdentityKey, LocalTask, Task, TaskStatus, UDA_LIST_ID, UDA_TASK_ID};

use crate::error::StoreError;

type Record = Map<String, Value>;

/// Parse the JSON array written by `task export` into local tasks.
///
/// Strict: the first record with a missing attribute, unknown status or
/// unreadable `end` date fails the whole export.
pub fn parse_export(json: &str) -> Result<Vec<LocalTask>, StoreError> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    records.iter().map(parse_record).collect()
}

fn parse_record(record: &Record) -> Result<LocalTask, StoreError> {
    let uuid = string_attr(record, "uuid", "<unknown>")?;
    let list_id = string_attr(record, UDA_LIST_ID, uuid)?;
    let task_id = string_attr(record, UDA_TASK_ID, uuid)?;
    let description = string_attr(record, "description", uuid)?;
    let status_str = string_attr(record, "status", uuid)?;

    let status = TaskStatus::from_local(status_str).map_err(|source| StoreError::Record {
        uuid: uuid.to_string(),
        source,
    })?;

    let completed_at = if status.is_completed() {
        let end = string_attr(record, "end", uuid)?;
        let at = timestamp::parse_local(end).map_err(|source| StoreError::Record {
            uuid: uuid.to_string(),
            source,
        })?;
        Some(at)
    } else {
        None
    };

    Ok(LocalTask::new(
        uuid,
        Task {
            key: IdentityKey::new(list_id, task_id),
            title: description.to_string(),
            completed_at,
            status,
        },
    ))
}

fn string_attr<'a>(record: &'a Record, name: &str, uuid: &str) -> Result<&'a str, StoreError> {
    record
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::MissingAttribute {
            uuid: uuid.to_string(),
            attribute: name.to_string(),
        })
}
