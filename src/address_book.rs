use std::io::Write;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::broadcast::DeploymentRecord;
use crate::cli::OutputFormat;

pub const DEFAULT_NAME_WIDTH: usize = 12;

/// Contract name to deployed address, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook {
    entries: IndexMap<String, String>,
}

/// A record that was dropped because its name had already been seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRecord {
    pub index: usize,
    pub contract_name: String,
    pub contract_address: String,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the book from records in order, keeping the first address
    /// seen for each name. The dropped records are returned alongside.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a DeploymentRecord>,
    ) -> (Self, Vec<DuplicateRecord>) {
        let mut book = Self::new();
        let mut duplicates = vec![];

        for (index, record) in records.into_iter().enumerate() {
            let inserted = book.insert_if_absent(
                &record.contract_name,
                &record.contract_address,
            );

            if !inserted {
                duplicates.push(DuplicateRecord {
                    index,
                    contract_name: record.contract_name.clone(),
                    contract_address: record.contract_address.clone(),
                });
            }
        }

        (book, duplicates)
    }

    /// Returns false (and leaves the book untouched) if `name` is taken.
    pub fn insert_if_absent(&mut self, name: &str, address: &str) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }

        self.entries.insert(name.to_string(), address.to_string());

        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, address)| (name.as_str(), address.as_str()))
    }

    /// One `<name padded to name_width> <address>` line per entry. Names
    /// longer than `name_width` are written as is.
    pub fn write_text<W: Write>(
        &self,
        writer: &mut W,
        name_width: usize,
    ) -> std::io::Result<()> {
        for (name, address) in self.iter() {
            writeln!(writer, "{name:<name_width$} {address}")?;
        }

        Ok(())
    }

    pub fn write_formatted<W: Write>(
        &self,
        writer: &mut W,
        format: OutputFormat,
        name_width: usize,
    ) -> eyre::Result<()> {
        match format {
            OutputFormat::Text => self.write_text(writer, name_width)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, self)?;
                writeln!(writer)?;
            }
            OutputFormat::Yaml => serde_yaml::to_writer(&mut *writer, self)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, address: &str) -> DeploymentRecord {
        DeploymentRecord {
            contract_name: name.to_string(),
            contract_address: address.to_string(),
        }
    }

    fn render(book: &AddressBook) -> String {
        let mut out = vec![];
        book.write_text(&mut out, DEFAULT_NAME_WIDTH).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn first_seen_address_wins() {
        let records = vec![
            record("Token", "0xAA"),
            record("Vault", "0xBB"),
            record("Token", "0xCC"),
        ];

        let (book, duplicates) = AddressBook::from_records(&records);

        assert_eq!(render(&book), "Token        0xAA\nVault        0xBB\n");
        assert_eq!(
            duplicates,
            vec![DuplicateRecord {
                index: 2,
                contract_name: "Token".to_string(),
                contract_address: "0xCC".to_string(),
            }]
        );
    }

    #[test]
    fn keeps_first_appearance_order() {
        let records = vec![
            record("Zeta", "0x01"),
            record("Alpha", "0x02"),
            record("Zeta", "0x03"),
            record("Mid", "0x04"),
            record("Alpha", "0x05"),
        ];

        let (book, duplicates) = AddressBook::from_records(&records);

        assert_eq!(
            book.iter().collect::<Vec<_>>(),
            vec![("Zeta", "0x01"), ("Alpha", "0x02"), ("Mid", "0x04")]
        );
        assert_eq!(
            duplicates.iter().map(|d| d.index).collect::<Vec<_>>(),
            vec![2, 4]
        );
        assert_eq!(book.len() + duplicates.len(), records.len());
    }

    #[test]
    fn long_names_are_not_truncated() {
        let records = vec![
            record("TwelveChars1", "0x01"),
            record("TransparentUpgradeableProxy", "0x02"),
        ];

        let (book, _) = AddressBook::from_records(&records);

        assert_eq!(
            render(&book),
            "TwelveChars1 0x01\nTransparentUpgradeableProxy 0x02\n"
        );
    }

    #[test]
    fn padding_counts_characters() {
        let (book, _) =
            AddressBook::from_records(&[record("Jeton€", "0x01")]);

        assert_eq!(render(&book), "Jeton€       0x01\n");
    }

    #[test]
    fn custom_width() {
        let (book, _) = AddressBook::from_records(&[record("Token", "0x01")]);

        let mut out = vec![];
        book.write_text(&mut out, 8).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Token    0x01\n");
    }

    #[test]
    fn empty_book_writes_nothing() {
        let records: Vec<DeploymentRecord> = vec![];

        let (book, duplicates) = AddressBook::from_records(&records);

        assert!(book.is_empty());
        assert!(duplicates.is_empty());
        assert_eq!(render(&book), "");
    }

    #[test]
    fn insert_if_absent_does_not_overwrite() {
        let mut book = AddressBook::new();

        assert!(book.insert_if_absent("Token", "0xAA"));
        assert!(!book.insert_if_absent("Token", "0xCC"));
        assert_eq!(book.get("Token"), Some("0xAA"));
    }

    #[test]
    fn json_output_is_an_ordered_object() -> eyre::Result<()> {
        let (book, _) = AddressBook::from_records(&[
            record("Vault", "0xBB"),
            record("Token", "0xAA"),
        ]);

        let mut out = vec![];
        book.write_formatted(&mut out, OutputFormat::Json, 0)?;

        assert_eq!(
            String::from_utf8(out)?,
            "{\n  \"Vault\": \"0xBB\",\n  \"Token\": \"0xAA\"\n}\n"
        );

        Ok(())
    }

    #[test]
    fn yaml_output_reads_back() -> eyre::Result<()> {
        let (book, _) = AddressBook::from_records(&[
            record("Vault", "0xBB"),
            record("Token", "0xAA"),
        ]);

        let mut out = vec![];
        book.write_formatted(&mut out, OutputFormat::Yaml, 0)?;

        let read_back: AddressBook = serde_yaml::from_slice(&out)?;

        assert_eq!(read_back, book);
        assert_eq!(
            read_back.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["Vault", "Token"]
        );

        Ok(())
    }
}
