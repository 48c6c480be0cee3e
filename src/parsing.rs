use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ical::parser::vcard::component::VcardContact;
use ical::VcardParser;
use tracing::{debug, warn};

use crate::record::Record;

// Read the addressbook file as a string. A file that does not exist yet is an empty addressbook
pub fn read_addressbook(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no addressbook file yet");
            Ok(String::new())
        }
        Err(err) => {
            Err(err).with_context(|| format!("Could not read addressbook {}", path.display()))
        }
    }
}

// Split the content of an addressbook file into its records, in file order.
// Every "[...]" line opens a new record, the lines after it belong to that record until the next
// one. The display name of each record is taken from its first "name=" line, as it was written
pub fn parse_addressbook(content: &str) -> Vec<Record> {
    let mut records: Vec<Record> = vec![];
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            records.push(Record {
                key: trimmed.to_string(),
                name: String::new(),
                lines: vec![],
            });
            continue;
        }
        match records.last_mut() {
            Some(record) => {
                if let Some(name) = line.strip_prefix("name=") {
                    if !record.lines.iter().any(|l| l.starts_with("name=")) {
                        record.name = name.to_string();
                    }
                }
                record.lines.push(line.to_string());
            }
            None => warn!(line, "ignoring line outside of any [index] block"),
        }
    }
    for record in records.iter().filter(|r| !r.lines.iter().any(|l| l.starts_with("name="))) {
        warn!(key = %record.key, "record has no name= line");
    }
    debug!(records = records.len(), "parsed addressbook");
    records
}

// Open a vCard file and parse all the contacts in it
pub fn read_vcards(path: &Path) -> Result<Vec<VcardContact>> {
    let file = File::open(path)
        .with_context(|| format!("Could not open vCard file {}", path.display()))?;
    parse_vcards(BufReader::new(file))
        .with_context(|| format!("Could not parse vCard file {}", path.display()))
}

// Parse every vCard entry from a reader. A single malformed entry makes the whole file fail,
// so that nothing is written from a half-read import
pub fn parse_vcards<B: BufRead>(reader: B) -> Result<Vec<VcardContact>> {
    let mut contacts = vec![];
    for (idx, contact) in VcardParser::new(reader).enumerate() {
        let contact = contact.map_err(|err| anyhow!("vCard entry {}: {}", idx + 1, err))?;
        contacts.push(contact);
    }
    debug!(entries = contacts.len(), "parsed vCard entries");
    Ok(contacts)
}
