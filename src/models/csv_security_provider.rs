use crate::models::{Security, SecurityProvider};
use crate::Error;
use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use flate2::read::GzDecoder;
use log::info;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Reads the securities corpus from a CSV file with the headers
/// `symbol,name,exchange,exchangeShortName,type`. Files ending in `.gz` are decompressed
/// first.
pub struct CsvSecurityProvider {
    path: PathBuf,
    cache: Mutex<Option<Vec<Security>>>,
}

impl CsvSecurityProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_securities_from_string(csv: &str) -> Result<Vec<Security>, Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(Cursor::new(csv));

        let mut securities = Vec::new();

        for record in reader.deserialize::<Security>() {
            let security =
                record.map_err(|e| Error::ParserError(format!("Failed to read record: {}", e)))?;

            if security.symbol.is_empty() {
                continue;
            }

            securities.push(security);
        }

        Ok(securities)
    }

    /// Decompresses gzip bytes and parses the contained CSV.
    pub fn read_securities_from_gzip_bytes(bytes: &[u8]) -> Result<Vec<Security>, Error> {
        let mut decoder = GzDecoder::new(bytes);
        let mut decompressed_data = String::new();
        decoder.read_to_string(&mut decompressed_data)?;

        Self::read_securities_from_string(&decompressed_data)
    }

    async fn read_file(&self) -> Result<Vec<Security>, Error> {
        let bytes = tokio::fs::read(&self.path).await?;

        let is_gzip = self
            .path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("gz"));

        if is_gzip {
            Self::read_securities_from_gzip_bytes(&bytes)
        } else {
            let csv = String::from_utf8(bytes)
                .map_err(|e| Error::ParserError(format!("Corpus is not valid UTF-8: {}", e)))?;
            Self::read_securities_from_string(&csv)
        }
    }
}

#[async_trait]
impl SecurityProvider for CsvSecurityProvider {
    fn name(&self) -> &str {
        "csv"
    }

    async fn get_securities(&self, force_refresh: bool) -> Result<Vec<Security>, Error> {
        let mut cache = self.cache.lock().await;

        if !force_refresh {
            if let Some(securities) = cache.as_ref() {
                return Ok(securities.clone());
            }
        }

        info!("Reading securities from {}", self.path.display());
        let securities = self.read_file().await?;
        *cache = Some(securities.clone());

        Ok(securities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_rows_and_skips_empty_symbols() {
        let csv = "symbol,name,exchange,exchangeShortName,type\n\
                   AAPL,Apple Inc.,NASDAQ Global Select,NASDAQ,stock\n\
                   ,Nameless Corp,NYSE,NYSE,stock\n\
                   9988.HK , Alibaba Group Holding Limited ,Hong Kong Stock Exchange,HKSE,\n";

        let securities = CsvSecurityProvider::read_securities_from_string(csv).unwrap();

        assert_eq!(securities.len(), 2);
        assert_eq!(securities[0].symbol, "AAPL");
        assert_eq!(securities[0].security_type.as_deref(), Some("stock"));
        assert_eq!(securities[1].symbol, "9988.HK");
        assert_eq!(securities[1].name, "Alibaba Group Holding Limited");
        assert_eq!(securities[1].exchange_short_name, "HKSE");
        assert_eq!(securities[1].security_type, None);
    }

    #[test]
    fn test_malformed_record_is_a_parser_error() {
        let csv = "symbol,name,exchange,exchangeShortName,type\n\"AAPL,Apple Inc.\n";

        let result = CsvSecurityProvider::read_securities_from_string(csv);

        assert!(matches!(result, Err(Error::ParserError(_))));
    }
}
