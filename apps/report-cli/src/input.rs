//! # Sales Export Input
//!
//! Reads the sales export handed over by the data service.
//!
//! Two shapes are accepted:
//! ```text
//! [ { "id": "s1", ... }, ... ]            bare array of sales
//! { "sales": [ { "id": "s1", ... } ] }    wrapped in an object
//! ```
//! Amounts are integer cents (`"total": 1999` for $19.99); a fractional
//! amount fails with [`ReportError::InvalidExport`]. A path of `-` reads
//! from stdin.

use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;
use tally_core::Sale;
use tracing::{debug, info};

use crate::error::{ReportError, ReportResult};

/// Path that selects stdin.
pub const STDIN_PATH: &str = "-";

/// Loads the sales export at `path` (`-` for stdin).
pub fn load_sales(path: &Path) -> ReportResult<Vec<Sale>> {
    let sales = if path.as_os_str() == STDIN_PATH {
        debug!("Reading sales export from stdin");
        parse_sales(io::stdin().lock())?
    } else {
        debug!(?path, "Reading sales export");
        let contents =
            std::fs::read_to_string(path).map_err(|source| ReportError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        parse_sales(contents.as_bytes())?
    };

    info!(count = sales.len(), "Loaded sales export");
    Ok(sales)
}

/// Parses a sales export from any reader.
///
/// Read failures surface as [`ReportError::Io`], malformed JSON as
/// [`ReportError::InvalidExport`].
pub fn parse_sales<R: Read>(mut reader: R) -> ReportResult<Vec<Sale>> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;

    // `{ "sales": [...] }` → `[...]`; field errors keep their own message
    let sales = match serde_json::from_str::<Value>(&contents)? {
        Value::Object(mut wrapper) => wrapper.remove("sales").unwrap_or(Value::Object(wrapper)),
        other => other,
    };

    Ok(serde_json::from_value(sales)?)
}

/// Rejects exports with more than `max` transactions.
pub fn enforce_limit(sales: &[Sale], max: usize) -> ReportResult<()> {
    if sales.len() > max {
        return Err(ReportError::TooManyTransactions {
            count: sales.len(),
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EXPORT: &str = r#"[
        {
            "id": "s1",
            "occurredAt": "2024-01-01T09:00:00Z",
            "customerName": "Ana",
            "items": [
                {
                    "productId": "A",
                    "name": "Product A",
                    "quantity": 2,
                    "unitPrice": 5000,
                    "finalUnitPrice": 5000,
                    "costPrice": 4000,
                    "subtotal": 10000,
                    "profit": 2000,
                    "margin": 20.0
                }
            ],
            "total": 10000,
            "totalProfit": 2000
        },
        {
            "id": "s2",
            "occurredAt": "2024-01-02T09:00:00Z",
            "total": 0
        }
    ]"#;

    #[test]
    fn test_parse_bare_array() {
        let sales = parse_sales(EXPORT.as_bytes()).unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].items[0].product_id, "A");
        assert_eq!(sales[0].total.cents(), 10000);
        assert!(sales[1].items.is_empty());
    }

    #[test]
    fn test_parse_wrapped_object() {
        let wrapped = format!("{{\"sales\": {}}}", EXPORT);
        let sales = parse_sales(wrapped.as_bytes()).unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[1].id, "s2");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = parse_sales("{\"orders\": []}".as_bytes());
        assert!(matches!(result, Err(ReportError::InvalidExport(_))));

        let result = parse_sales("not json".as_bytes());
        assert!(matches!(result, Err(ReportError::InvalidExport(_))));
    }

    #[test]
    fn test_parse_rejects_fractional_amounts() {
        let export = r#"[{"id":"s","occurredAt":"2024-01-01T10:00:00Z","total":19.99}]"#;
        let err = parse_sales(export.as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::InvalidExport(_)));
        assert!(err.to_string().contains("not in integer cents"));
    }

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
        }
    }

    #[test]
    fn test_read_failure_is_io_error() {
        let err = parse_sales(BrokenPipe).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: stream closed");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();

        let sales = load_sales(file.path()).unwrap();
        assert_eq!(sales.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_sales(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ReportError::ReadFailed { .. })));
    }

    #[test]
    fn test_enforce_limit() {
        let sales = parse_sales(EXPORT.as_bytes()).unwrap();
        assert!(enforce_limit(&sales, 2).is_ok());
        assert!(matches!(
            enforce_limit(&sales, 1),
            Err(ReportError::TooManyTransactions { count: 2, max: 1 })
        ));
    }
}
