//! Dataset loading: the one asynchronous boundary of the pipeline.
//!
//! A fetch either succeeds and rendering proceeds, or fails and the whole
//! run aborts. No retries, no partial charts.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use heatmap_common::{ChartError, ChartResult, TemperatureDataset};

/// The canonical global-temperature dataset.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

/// Fetches and parses the temperature dataset over HTTP.
pub struct DatasetLoader {
    client: Client,
}

impl DatasetLoader {
    /// Create a loader with the given request timeout.
    pub fn new(request_timeout: Duration) -> ChartResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ChartError::Fetch(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Fetch and parse the dataset. Network failures, non-success statuses,
    /// and malformed payloads all surface as `ChartError::Fetch`.
    pub async fn load(&self, url: &str) -> ChartResult<TemperatureDataset> {
        debug!(url, "fetching dataset");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ChartError::Fetch(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChartError::Fetch(format!("HTTP {} from {}", status, url)));
        }

        let dataset: TemperatureDataset = response
            .json()
            .await
            .map_err(|e| ChartError::Fetch(format!("invalid payload from {}: {}", url, e)))?;

        info!(
            records = dataset.monthly_variance.len(),
            base_temperature = dataset.base_temperature,
            "dataset fetched"
        );
        Ok(dataset)
    }
}

/// Read and parse a dataset from a local JSON file (same parse path as the
/// network loader).
pub fn load_from_file(path: &Path) -> ChartResult<TemperatureDataset> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ChartError::Fetch(format!("failed to read {}: {}", path.display(), e)))?;
    TemperatureDataset::from_json(&content)
        .map_err(|e| ChartError::Fetch(format!("invalid payload in {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"baseTemperature": 8.66, "monthlyVariance": [{{"year": 1753, "month": 1, "variance": -1.366}}]}}"#
        )
        .unwrap();

        let dataset = load_from_file(file.path()).unwrap();
        assert_eq!(dataset.base_temperature, 8.66);
        assert_eq!(dataset.monthly_variance.len(), 1);
    }

    #[test]
    fn test_load_from_file_bad_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        assert!(matches!(
            load_from_file(file.path()),
            Err(ChartError::Fetch(_))
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(matches!(
            load_from_file(Path::new("/nonexistent/data.json")),
            Err(ChartError::Fetch(_))
        ));
    }
}
