use std::collections::BTreeMap;
use std::fmt;

// The keys an addressbook record may carry. The declaration order is the order in which
// imported fields are written out, so the derived Ord is what sorts the lines of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldKey {
    Name,
    Email,
    Url,
    Address,
    City,
    Zip,
    State,
    Country,
    Fax,
    Mobile,
    Phone,
    Workphone,
    Notes,
}

impl FieldKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Email => "email",
            FieldKey::Url => "url",
            FieldKey::Address => "address",
            FieldKey::City => "city",
            FieldKey::Zip => "zip",
            FieldKey::State => "state",
            FieldKey::Country => "country",
            FieldKey::Fax => "fax",
            FieldKey::Mobile => "mobile",
            FieldKey::Phone => "phone",
            FieldKey::Workphone => "workphone",
            FieldKey::Notes => "notes",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Values collected for a contact, grouped by key
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Fields {
    values: BTreeMap<FieldKey, Vec<String>>,
}

impl Fields {
    pub fn new() -> Fields {
        Fields::default()
    }

    // Empty values are dropped here, so a key never ends up rendered as "key="
    pub fn push(&mut self, key: FieldKey, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.values.entry(key).or_default().push(value.to_string());
    }

    pub fn get(&self, key: FieldKey) -> &[String] {
        self.values.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    // One "key=v1 v2" line per key that collected something
    pub fn lines(&self) -> Vec<String> {
        self.values
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(key, values)| format!("{}={}", key, values.join(" ")))
            .collect()
    }
}

/// One contact of the addressbook.
///
/// `key` is the bracketed index the record had where it came from (`[3]`), `name` its display
/// name and `lines` the `key=value` lines of the block, `name=` line included, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: String,
    pub name: String,
    pub lines: Vec<String>,
}

impl Record {
    // Build a record out of the fields collected from a vCard entry
    pub fn from_fields(key: String, name: &str, fields: &Fields) -> Record {
        let mut lines = vec![format!("{}={}", FieldKey::Name, name)];
        lines.extend(fields.lines());
        Record {
            key,
            name: name.to_string(),
            lines,
        }
    }

    // The sort key: names are compared with case folded
    pub fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }
}
