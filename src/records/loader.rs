use crate::config::ColumnNames;
use crate::records::ExpectedRecord;
use crate::{RecordError, RecordResult};
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;

/// Column positions resolved from the header row
struct ColumnIndex {
    id: usize,
    title: usize,
    involved_person: usize,
    output_type: usize,
    evidence_link: usize,
    year: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, columns: &ColumnNames) -> RecordResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| RecordError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            id: find(columns.id.as_str())?,
            title: find(columns.title.as_str())?,
            involved_person: find(columns.involved_person.as_str())?,
            output_type: find(columns.output_type.as_str())?,
            evidence_link: find(columns.evidence_link.as_str())?,
            year: find(columns.year.as_str())?,
        })
    }

    fn build(&self, row: &StringRecord) -> ExpectedRecord {
        let field = |index: usize| row.get(index).unwrap_or_default().to_string();

        ExpectedRecord {
            id: field(self.id),
            title: field(self.title),
            year: field(self.year),
            involved_person: field(self.involved_person),
            output_type: field(self.output_type),
            evidence_link: field(self.evidence_link),
        }
    }
}

/// Loads every record of the CSV file at `path`
///
/// Any failure is fatal for the run: an unreadable file, a missing required
/// column or a row whose field count differs from the header.
pub fn load_records(path: &Path, columns: &ColumnNames) -> RecordResult<Vec<ExpectedRecord>> {
    let file = std::fs::File::open(path)?;
    parse_records(file, columns)
}

/// Parses records from any CSV source
pub fn parse_records<R: Read>(source: R, columns: &ColumnNames) -> RecordResult<Vec<ExpectedRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let index = ColumnIndex::resolve(&headers, columns)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        records.push(index.build(&row));
    }

    tracing::debug!("Parsed {} records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,title,involved-person,output-type,evidence-link,year\n";

    fn parse(content: &str) -> RecordResult<Vec<ExpectedRecord>> {
        parse_records(content.as_bytes(), &ColumnNames::default())
    }

    #[test]
    fn test_parse_basic_records() {
        let content = format!(
            "{}27,Study X,Jane Doe,Journal,https://example.com/a,2022\n29,\"Study, with comma\",John Roe,Journal,https://example.com/b,2021\n",
            HEADER
        );
        let records = parse(&content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "27");
        assert_eq!(records[0].title, "Study X");
        assert_eq!(records[0].involved_person, "Jane Doe");
        assert_eq!(records[0].evidence_link, "https://example.com/a");
        assert_eq!(records[0].year, "2022");
        assert_eq!(records[1].title, "Study, with comma");
    }

    #[test]
    fn test_columns_in_any_order() {
        let content = "year,evidence-link,id,output-type,title,involved-person\n2020,https://x.org/1,5,Journal,T,P\n";
        let records = parse(content).unwrap();

        assert_eq!(records[0].id, "5");
        assert_eq!(records[0].year, "2020");
        assert_eq!(records[0].evidence_link, "https://x.org/1");
    }

    #[test]
    fn test_skips_empty_lines() {
        let content = format!("{}\n1,A,B,C,https://x.org,2020\n\n2,D,E,F,https://y.org,2021\n", HEADER);
        let records = parse(&content).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let content = "id,title,involved-person,evidence-link,year\n1,A,B,https://x.org,2020\n";
        let result = parse(content);
        assert!(matches!(result, Err(RecordError::MissingColumn(ref c)) if c == "output-type"));
    }

    #[test]
    fn test_ragged_row_is_fatal() {
        let content = format!("{}1,A,B\n", HEADER);
        assert!(matches!(parse(&content), Err(RecordError::Csv(_))));
    }

    #[test]
    fn test_custom_column_names() {
        let columns = ColumnNames {
            id: "No".to_string(),
            title: "Judul".to_string(),
            ..ColumnNames::default()
        };
        let content = "No,Judul,involved-person,output-type,evidence-link,year\n7,T,P,J,https://x.org,2019\n";
        let records = parse_records(content.as_bytes(), &columns).unwrap();

        assert_eq!(records[0].id, "7");
        assert_eq!(records[0].title, "T");
    }

    #[test]
    fn test_missing_file() {
        let result = load_records(Path::new("/nonexistent/data.csv"), &ColumnNames::default());
        assert!(matches!(result, Err(RecordError::Io(_))));
    }
}
