use ical::parser::vcard::component::VcardContact;
use ical::property::Property;
use tracing::debug;

use crate::record::{FieldKey, Fields, Record};

// Records built from a vCard file, with the number of entries that were processed
#[derive(Debug)]
pub struct Import {
    pub records: Vec<Record>,
    pub total: usize,
}

// Turn every vCard entry into a Record. Entries are numbered from 1, which is also the name
// given to a contact that has neither a formatted name nor an email address
pub fn import_contacts(contacts: &[VcardContact]) -> Import {
    let mut records = vec![];
    let mut total = 0;
    for (idx, contact) in contacts.iter().enumerate() {
        let seq = idx + 1;
        total += 1;
        let fields = collect_fields(&contact.properties);
        let name = display_name(&contact.properties, &fields, seq);
        debug!(seq, name = %name, "imported contact");
        records.push(Record::from_fields(format!("[{}]", seq), &name, &fields));
    }
    Import { records, total }
}

fn collect_fields(properties: &[Property]) -> Fields {
    let mut fields = Fields::new();
    for property in properties {
        let value = match &property.value {
            Some(value) => value.as_str(),
            None => continue,
        };
        match property_name(property).to_ascii_uppercase().as_str() {
            "ADR" => add_address(&mut fields, value),
            "TEL" => {
                if let Some(key) = classify_tel(&type_attributes(property)) {
                    fields.push(key, &unescape_text(value));
                }
            }
            "URL" => fields.push(FieldKey::Url, &value.replace("http\\://", "http://")),
            "EMAIL" => fields.push(FieldKey::Email, &unescape_text(value)),
            "NOTE" => fields.push(FieldKey::Notes, &unescape_text(value)),
            _ => {}
        }
    }
    fields
}

// Property name without its group, "item1.EMAIL" -> "EMAIL"
fn property_name(property: &Property) -> &str {
    match property.name.rsplit_once('.') {
        Some((_, name)) => name,
        None => &property.name,
    }
}

// Formatted name, else first email, else the entry number
fn display_name(properties: &[Property], fields: &Fields, seq: usize) -> String {
    let formatted = properties
        .iter()
        .find(|p| property_name(p).eq_ignore_ascii_case("FN"))
        .and_then(|p| p.value.as_deref())
        .map(|value| unescape_text(value).trim().to_string())
        .unwrap_or_default();
    if !formatted.is_empty() {
        return formatted;
    }
    if let Some(email) = fields.get(FieldKey::Email).first() {
        let email = email.trim_end_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());
        if !email.is_empty() {
            return email.to_string();
        }
    }
    seq.to_string()
}

// ADR is "PO box;extended;street;city;region;code;country", each part goes to its own field
fn add_address(fields: &mut Fields, value: &str) {
    let parts = split_components(value);
    let part = |idx: usize| parts.get(idx).map(String::as_str).unwrap_or("");
    fields.push(FieldKey::Address, part(2));
    fields.push(FieldKey::Zip, part(5));
    fields.push(FieldKey::City, part(3));
    fields.push(FieldKey::State, part(4));
    fields.push(FieldKey::Country, part(6));
}

// All TYPE attributes of a property, upper-cased. Handles TYPE=A,B and repeated TYPE parameters
fn type_attributes(property: &Property) -> Vec<String> {
    let mut attributes = vec![];
    for (name, values) in property.params.iter().flatten() {
        if name.eq_ignore_ascii_case("TYPE") {
            attributes.extend(
                values
                    .iter()
                    .flat_map(|value| value.split(','))
                    .map(|value| value.trim().to_ascii_uppercase())
                    .filter(|value| !value.is_empty()),
            );
        }
    }
    attributes
}

// A phone number lands in exactly one field. Fax wins over every other type, and a number
// without any type is a plain phone
fn classify_tel(attributes: &[String]) -> Option<FieldKey> {
    let has = |wanted: &str| attributes.iter().any(|attribute| attribute == wanted);
    if attributes.is_empty() {
        Some(FieldKey::Phone)
    } else if has("FAX") {
        Some(FieldKey::Fax)
    } else if has("WORK") {
        Some(FieldKey::Workphone)
    } else if has("HOME") {
        Some(FieldKey::Phone)
    } else if has("CELL") {
        Some(FieldKey::Mobile)
    } else {
        None
    }
}

// Split a structured value on the ';' that are not escaped, decoding each component
fn split_components(value: &str) -> Vec<String> {
    let mut components = vec![];
    let mut current = String::new();
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ';' => components.push(unescape_text(&std::mem::take(&mut current))),
            _ => current.push(c),
        }
    }
    components.push(unescape_text(&current));
    components
}

// Decode vCard text escapes. A newline would break the line format, so it becomes a space
fn unescape_text(value: &str) -> String {
    let mut text = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => text.push(' '),
            Some(next @ ('\\' | ',' | ';')) => text.push(next),
            Some(next) => {
                text.push('\\');
                text.push(next);
            }
            None => text.push('\\'),
        }
    }
    text
}
