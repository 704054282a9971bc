//! Backend endpoints consumed by the client.

use std::fmt;

/// HTTP method used by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Every call the client makes against the prediction service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Register,
    Logout,
    GetDataset,
    DownloadDataset,
    TrainModels,
    Predict,
    GetCharts,
    GetEvaluationCharts,
    GetPredictions,
    DownloadPredictions,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login | Endpoint::Register | Endpoint::TrainModels | Endpoint::Predict => {
                Method::Post
            }
            _ => Method::Get,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Login => "/login",
            Endpoint::Register => "/register",
            Endpoint::Logout => "/logout",
            Endpoint::GetDataset => "/get-dataset",
            Endpoint::DownloadDataset => "/download-dataset",
            Endpoint::TrainModels => "/train-models",
            Endpoint::Predict => "/predict",
            Endpoint::GetCharts => "/get-charts",
            Endpoint::GetEvaluationCharts => "/get-evaluation-charts",
            Endpoint::GetPredictions => "/get-predictions",
            Endpoint::DownloadPredictions => "/download-predictions",
        }
    }

    /// Endpoints answered with a file instead of a JSON envelope
    pub fn is_download(&self) -> bool {
        matches!(self, Endpoint::DownloadDataset | Endpoint::DownloadPredictions)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self.method() {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        write!(f, "{} {}", method, self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods() {
        assert_eq!(Endpoint::Login.method(), Method::Post);
        assert_eq!(Endpoint::Predict.method(), Method::Post);
        assert_eq!(Endpoint::Logout.method(), Method::Get);
        assert_eq!(Endpoint::GetEvaluationCharts.method(), Method::Get);
    }

    #[test]
    fn test_display() {
        assert_eq!(Endpoint::TrainModels.to_string(), "POST /train-models");
        assert_eq!(Endpoint::GetPredictions.to_string(), "GET /get-predictions");
    }

    #[test]
    fn test_downloads() {
        assert!(Endpoint::DownloadDataset.is_download());
        assert!(Endpoint::DownloadPredictions.is_download());
        assert!(!Endpoint::GetDataset.is_download());
    }
}
