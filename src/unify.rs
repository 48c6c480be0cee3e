use tracing::debug;

use crate::record::Record;

// Adds the imported records to the ones already in the addressbook. Each imported contact
// refreshes at most one existing record, the first not yet refreshed one with exactly the same
// name, which is replaced in place. Imported contacts without such a record are appended.
// Returns the unified records and the number of existing records that were replaced
pub fn merge_records(existing: Vec<Record>, imported: Vec<Record>) -> (Vec<Record>, usize) {
    let mut unified = existing;
    let mut refreshed = vec![false; unified.len()];
    let mut replaced = 0;
    let mut added = 0;
    for record in imported {
        let matching = unified
            .iter()
            .zip(refreshed.iter())
            .position(|(old, done)| !done && old.name == record.name);
        match matching {
            Some(idx) => {
                unified[idx] = record;
                refreshed[idx] = true;
                replaced += 1;
            }
            None => {
                unified.push(record);
                added += 1;
            }
        }
    }
    debug!(total = unified.len(), replaced, added, "merged records");
    (unified, replaced)
}

// Sorts the records by name, ignoring case, and gives them new indexes [0], [1]...
// The sort is stable: records with the same name keep the order they came in, and all of them
// are kept, each with its own lines
pub fn sort_records(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by_cached_key(Record::sort_key);
    for (idx, record) in records.iter_mut().enumerate() {
        record.key = format!("[{}]", idx);
    }
    records
}

// Serializes the records in the addressbook format: one block per record, a blank line between
// blocks and none after the last one
pub fn render_addressbook(records: &[Record]) -> String {
    records
        .iter()
        .map(|record| {
            let mut block = format!("{}\n", record.key);
            for line in &record.lines {
                block.push_str(line);
                block.push('\n');
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}
