//! Datadog endpoints tried by the fetcher, in priority order

use crate::config::FetcherConfig;
use crate::http::HttpRequest;

/// Length of the query window
pub const WINDOW_SECS: i64 = 86_400;

/// Page size requested from the search endpoint
pub const SEARCH_LIMIT: u32 = 10;

/// Query window in whole Unix seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    /// The 24 hours ending at `now`
    pub fn last_24h(now: i64) -> Self {
        Self {
            start: now - WINDOW_SECS,
            end: now,
        }
    }

    pub fn ending_now() -> Self {
        Self::last_24h(chrono::Utc::now().timestamp())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// `/api/v2/apm/traces`, no filters
    Traces,
    /// `/api/v2/apm/search/traces`
    SearchTraces,
    /// `/api/v1/events` filtered to trace sources
    Events,
}

impl EndpointKind {
    pub fn path(&self) -> &'static str {
        match self {
            EndpointKind::Traces => "/api/v2/apm/traces",
            EndpointKind::SearchTraces => "/api/v2/apm/search/traces",
            EndpointKind::Events => "/api/v1/events",
        }
    }

    /// Line printed before the request goes out
    pub fn announce(&self, url: &str) -> String {
        match self {
            EndpointKind::Traces => format!("Making request to {}", url),
            EndpointKind::SearchTraces => format!("\nTrying APM search endpoint: {}", url),
            EndpointKind::Events => format!("\nTrying events endpoint: {}", url),
        }
    }

    pub fn success_line(&self) -> &'static str {
        match self {
            EndpointKind::Traces => "Successfully fetched traces",
            EndpointKind::SearchTraces => "Successfully fetched traces from search API",
            EndpointKind::Events => "Successfully fetched trace events",
        }
    }

    pub fn error_line(&self, status: u16) -> String {
        match self {
            EndpointKind::Traces => format!("Error fetching traces: {}", status),
            EndpointKind::SearchTraces => {
                format!("Error fetching traces from search API: {}", status)
            }
            EndpointKind::Events => format!("Error fetching trace events: {}", status),
        }
    }
}

/// One candidate request in the fallback chain
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub kind: EndpointKind,
    pub request: HttpRequest,
}

/// Build the ordered fallback chain for `config` over `window`
pub fn candidates(config: &FetcherConfig, window: TimeWindow) -> Vec<Endpoint> {
    let base = config.api_base();

    let request = |kind: EndpointKind| {
        let mut request = HttpRequest::get(format!("{}{}", base, kind.path()))
            .with_header("DD-API-KEY", config.api_key.expose())
            .with_header("Content-Type", "application/json");
        if let Some(app_key) = &config.app_key {
            request = request.with_header("DD-APPLICATION-KEY", app_key.expose());
        }
        request
    };

    vec![
        Endpoint {
            kind: EndpointKind::Traces,
            request: request(EndpointKind::Traces),
        },
        Endpoint {
            kind: EndpointKind::SearchTraces,
            request: request(EndpointKind::SearchTraces)
                .with_query("start", window.start)
                .with_query("end", window.end)
                .with_query("service", &config.service)
                .with_query("limit", SEARCH_LIMIT),
        },
        Endpoint {
            kind: EndpointKind::Events,
            request: request(EndpointKind::Events)
                .with_query("start", window.start)
                .with_query("end", window.end)
                .with_query("sources", "trace")
                .with_query("tags", format!("service:{}", config.service)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Secret;

    fn config() -> FetcherConfig {
        FetcherConfig {
            api_key: Secret::new("key123"),
            app_key: None,
            site: "datadoghq.com".to_string(),
            service: "sample-booking-app".to_string(),
        }
    }

    fn query(endpoint: &Endpoint) -> Vec<(&str, &str)> {
        endpoint
            .request
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_window_is_24h() {
        let window = TimeWindow::last_24h(1_700_000_000);
        assert_eq!(window.end, 1_700_000_000);
        assert_eq!(window.end - window.start, 86_400);
    }

    #[test]
    fn test_candidate_order_and_urls() {
        let endpoints = candidates(&config(), TimeWindow::last_24h(1_000_000));
        let urls: Vec<&str> = endpoints.iter().map(|e| e.request.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://api.datadoghq.com/api/v2/apm/traces",
                "https://api.datadoghq.com/api/v2/apm/search/traces",
                "https://api.datadoghq.com/api/v1/events",
            ]
        );
    }

    #[test]
    fn test_candidate_queries() {
        let endpoints = candidates(&config(), TimeWindow::last_24h(1_000_000));

        assert!(endpoints[0].request.query.is_empty());
        assert_eq!(
            query(&endpoints[1]),
            vec![
                ("start", "913600"),
                ("end", "1000000"),
                ("service", "sample-booking-app"),
                ("limit", "10"),
            ]
        );
        assert_eq!(
            query(&endpoints[2]),
            vec![
                ("start", "913600"),
                ("end", "1000000"),
                ("sources", "trace"),
                ("tags", "service:sample-booking-app"),
            ]
        );
    }

    #[test]
    fn test_auth_headers() {
        let mut config = config();
        let endpoints = candidates(&config, TimeWindow::last_24h(0));
        for endpoint in &endpoints {
            assert!(endpoint
                .request
                .headers
                .contains(&("DD-API-KEY".to_string(), "key123".to_string())));
            assert!(endpoint
                .request
                .headers
                .contains(&("Content-Type".to_string(), "application/json".to_string())));
            assert_eq!(endpoint.request.headers.len(), 2);
        }

        config.app_key = Some(Secret::new("app456"));
        let endpoints = candidates(&config, TimeWindow::last_24h(0));
        assert!(endpoints[2]
            .request
            .headers
            .contains(&("DD-APPLICATION-KEY".to_string(), "app456".to_string())));
    }
}
