//! Dataset retrieval over HTTPS (or from a local file).

use std::fs::File;
use std::io::Cursor;

use log::{debug, info};
use reqwest::blocking::Client;

use crate::data::{DataError, Dataset};
use crate::domain::{DataSource, DEFAULT_DATA_URL};
use crate::io::ingest::parse_sales_csv;

/// Environment variable that overrides the default dataset URL.
pub const URL_ENV_VAR: &str = "AUTOSALES_CSV_URL";

pub struct DataFetcher {
    client: Client,
}

impl DataFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Resolve the default source: `AUTOSALES_CSV_URL` (from the environment or
    /// `.env`) if set, otherwise the built-in URL.
    pub fn source_from_env() -> DataSource {
        dotenvy::dotenv().ok();
        match std::env::var(URL_ENV_VAR) {
            Ok(url) if !url.trim().is_empty() => DataSource::Url(url.trim().to_string()),
            _ => DataSource::Url(DEFAULT_DATA_URL.to_string()),
        }
    }

    /// Load and validate the dataset from `source`.
    pub fn load(&self, source: &DataSource) -> Result<Dataset, DataError> {
        let records = match source {
            DataSource::Url(url) => {
                let body = self.fetch_bytes(url)?;
                parse_sales_csv(Cursor::new(body))?
            }
            DataSource::File(path) => {
                debug!("reading dataset from {}", path.display());
                parse_sales_csv(File::open(path)?)?
            }
        };

        let dataset = Dataset::new(records)?;
        info!(
            "Data downloaded and read into a dataset: {} rows ({} in recession periods, {} years)",
            dataset.len(),
            dataset.recession_len(),
            dataset.years().len(),
        );
        Ok(dataset)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, DataError> {
        debug!("GET {url}");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| DataError::Fetch(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DataError::Fetch(format!(
                "request failed with status {}",
                resp.status()
            )));
        }

        let body = resp
            .bytes()
            .map_err(|e| DataError::Fetch(format!("failed to read response body: {e}")))?;
        Ok(body.to_vec())
    }
}

impl Default for DataFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper: one-shot load with a fresh client.
pub fn load_dataset(source: &DataSource) -> Result<Dataset, DataError> {
    DataFetcher::new().load(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_from_local_file() {
        let path = std::env::temp_dir().join(format!("autosales_fetch_{}.csv", std::process::id()));
        {
            let mut f = File::create(&path).unwrap();
            writeln!(
                f,
                "Date,Year,Month,Recession,Automobile_Sales,Advertising_Expenditure,Vehicle_Type,unemployment_rate"
            )
            .unwrap();
            writeln!(f, "1/31/1980,1980,Jan,1,456.0,1558,Supperminicar,5.4").unwrap();
            writeln!(f, "2/29/1980,1980,Feb,0,555.9,3048,Smallfamiliycar,4.8").unwrap();
        }

        let ds = load_dataset(&DataSource::File(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.recession_len(), 1);
        assert_eq!(ds.years(), &[1980]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_dataset(&DataSource::File("/nonexistent/autosales.csv".into())).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }

    #[test]
    fn unreachable_url_is_a_runtime_fetch_error() {
        use crate::error::{AppError, EXIT_RUNTIME};

        let err = load_dataset(&DataSource::Url("http://127.0.0.1:1/x.csv".to_string())).unwrap_err();
        assert!(matches!(err, DataError::Fetch(_)), "unexpected error: {err:?}");
        assert_eq!(AppError::from(err).exit_code(), EXIT_RUNTIME);
    }
}
