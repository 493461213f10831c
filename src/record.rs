use chrono::NaiveDate;
use serde::Serialize;

/// One scraped resource. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRecord {
    pub title: String,
    pub description: String,
    pub contact: String,
    pub services: String,
    pub source_url: String,
    pub last_updated: NaiveDate,
}

pub const COLUMNS: [&str; 6] = [
    "title",
    "description",
    "contact",
    "services",
    "source_url",
    "last_updated",
];

/// Append-only, in-order collection of records for one run.
#[derive(Debug, Default)]
pub struct ResultSet {
    records: Vec<ResourceRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ResourceRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResourceRecord;
    type IntoIter = std::slice::Iter<'a, ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
