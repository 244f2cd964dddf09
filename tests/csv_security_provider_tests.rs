use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use test_utils::constants::TEST_SECURITIES_FILE_PATH;
use ticker_resolver::{CsvSecurityProvider, Error, SecurityProvider};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_plain_csv() {
        let provider = CsvSecurityProvider::new(TEST_SECURITIES_FILE_PATH.as_path());

        let securities = provider.get_securities(false).await.unwrap();

        assert!(securities.iter().any(|security| security.symbol == "9988.HK"));
        assert!(securities.iter().all(|security| !security.symbol.is_empty()));

        let moutai = securities
            .iter()
            .find(|security| security.symbol == "600519.SS")
            .unwrap();
        assert_eq!(moutai.name, "Kweichow Moutai Co., Ltd.");
        assert_eq!(moutai.exchange_short_name, "SHH");
    }

    #[tokio::test]
    async fn test_reads_gzip_compressed_csv() {
        let csv = fs::read(TEST_SECURITIES_FILE_PATH.as_path()).unwrap();

        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("securities.csv.gz");

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&csv).unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let plain = CsvSecurityProvider::new(TEST_SECURITIES_FILE_PATH.as_path())
            .get_securities(false)
            .await
            .unwrap();
        let compressed = CsvSecurityProvider::new(&path)
            .get_securities(false)
            .await
            .unwrap();

        assert_eq!(plain, compressed);
    }

    #[tokio::test]
    async fn test_cached_until_refresh() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("securities.csv");

        fs::write(
            &path,
            "symbol,name,exchange,exchangeShortName,type\nAAPL,Apple Inc.,NASDAQ Global Select,NASDAQ,stock\n",
        )
        .unwrap();

        let provider = CsvSecurityProvider::new(&path);
        assert_eq!(provider.get_securities(false).await.unwrap().len(), 1);

        fs::write(
            &path,
            "symbol,name,exchange,exchangeShortName,type\n\
             AAPL,Apple Inc.,NASDAQ Global Select,NASDAQ,stock\n\
             MSFT,Microsoft Corporation,NASDAQ Global Select,NASDAQ,stock\n",
        )
        .unwrap();

        assert_eq!(provider.get_securities(false).await.unwrap().len(), 1);
        assert_eq!(provider.get_securities(true).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("missing.csv");
        let provider = CsvSecurityProvider::new(&path);

        assert_eq!(provider.path(), path.as_path());

        let result = provider.get_securities(false).await;

        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
