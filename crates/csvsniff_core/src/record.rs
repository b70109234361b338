use std::sync::Arc;

/// Ordered column names read from the first row of the input.
///
/// Duplicate names are kept as-is. Columns are always addressed by position,
/// so two columns sharing a name never overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Header {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn num_columns(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(|s| s.as_str())
    }

    /// Position of the first column with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }
}

/// A single decoded data row.
///
/// Always holds exactly one value slot per header column. `None` indicates
/// the row ended before reaching the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    header: Arc<Header>,
    values: Vec<Option<String>>,
}

impl Record {
    /// Create a new record.
    ///
    /// Panics if the number of values doesn't match the header.
    pub fn new(header: Arc<Header>, values: Vec<Option<String>>) -> Self {
        assert_eq!(
            header.num_columns(),
            values.len(),
            "record values must align with header"
        );
        Record { header, values }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Get the value for a column by position.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).and_then(|v| v.as_deref())
    }

    /// Get the value for a column by name.
    ///
    /// If the header contains duplicate names, the first matching column is
    /// used.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        let idx = self.header.position(name)?;
        self.get(idx)
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    /// Iterate over (column name, value) pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.header
            .iter()
            .zip(self.values.iter().map(|v| v.as_deref()))
    }
}

/// The first K decoded records of an input.
///
/// Never holds more than the capacity it was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    capacity: usize,
    records: Vec<Record>,
}

impl Sample {
    pub fn with_capacity(capacity: usize) -> Self {
        Sample {
            capacity,
            records: Vec::with_capacity(capacity),
        }
    }

    /// Push a record to the sample.
    ///
    /// Returns false and discards the record if the sample is full.
    pub fn push(&mut self, record: Record) -> bool {
        if self.is_full() {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Arc<Header> {
        Arc::new(Header::new(names.iter().copied()))
    }

    #[test]
    fn record_lookup() {
        let header = header(&["Date", "Temp", "Notes"]);
        let record = Record::new(
            header,
            vec![Some("2024-01-01".to_string()), Some("28.5".to_string()), None],
        );

        assert_eq!(Some("28.5"), record.get(1));
        assert_eq!(Some("2024-01-01"), record.get_by_name("Date"));
        assert_eq!(None, record.get_by_name("Notes"));
        assert_eq!(None, record.get_by_name("Missing"));
        assert_eq!(None, record.get(3));

        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(
            vec![
                ("Date", Some("2024-01-01")),
                ("Temp", Some("28.5")),
                ("Notes", None)
            ],
            pairs
        );
    }

    #[test]
    fn duplicate_names_keep_positions() {
        let header = header(&["a", "a"]);
        let record = Record::new(header, vec![Some("1".to_string()), Some("x".to_string())]);

        assert_eq!(Some("1"), record.get_by_name("a"));
        assert_eq!(Some("1"), record.get(0));
        assert_eq!(Some("x"), record.get(1));
    }

    #[test]
    #[should_panic]
    fn record_misaligned_panics() {
        let _ = Record::new(header(&["a", "b"]), vec![None]);
    }

    #[test]
    fn sample_is_bounded() {
        let header = header(&["a"]);
        let mut sample = Sample::with_capacity(2);

        for idx in 0..5 {
            sample.push(Record::new(header.clone(), vec![Some(idx.to_string())]));
        }

        assert_eq!(2, sample.len());
        assert!(sample.is_full());
        assert_eq!(Some("1"), sample.records()[1].get(0));
    }
}
