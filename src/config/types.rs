use serde::Deserialize;

/// Main configuration structure for Site-Mirror
///
/// Every section is optional in the TOML file; missing sections and keys fall
/// back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub audit: AuditConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of link hops followed from the seed
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of concurrent probe/fetch tasks
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: u32,

    /// Total per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Retries for transport failures (DNS, connect, timeout); statuses are never retried
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base delay before the first retry, doubled on each further attempt (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,

    /// Optional deadline for the whole crawl (seconds)
    #[serde(rename = "max-crawl-duration-secs")]
    pub max_crawl_duration_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_concurrent_requests: 8,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 2,
            retry_backoff_ms: 500,
            max_crawl_duration_secs: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "site-mirror".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory of the mirror tree
    #[serde(rename = "mirror-root")]
    pub mirror_root: String,

    /// Extension appended to every mirrored file name (e.g. ".html")
    #[serde(rename = "file-extension")]
    pub file_extension: Option<String>,

    /// Path to the markdown report file
    #[serde(rename = "report-path")]
    pub report_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mirror_root: "mirror".to_string(),
            file_extension: None,
            report_path: None,
        }
    }
}

/// Tag audit configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Run the audit pass after the crawl
    pub enabled: bool,

    /// Tag names every mirrored site is expected to use
    #[serde(rename = "required-tags")]
    pub required_tags: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            required_tags: crate::audit::DEFAULT_REQUIRED_TAGS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}
