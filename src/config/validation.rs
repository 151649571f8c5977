use crate::config::types::{AuditConfig, Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_audit_config(&config.audit)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    if config.max_crawl_duration_secs == Some(0) {
        return Err(ConfigError::Validation(
            "max_crawl_duration_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact) = &config.contact_url {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.mirror_root.is_empty() {
        return Err(ConfigError::Validation(
            "mirror_root cannot be empty".to_string(),
        ));
    }

    if let Some(ext) = &config.file_extension {
        validate_extension(ext)?;
    }

    if config.report_path.as_deref() == Some("") {
        return Err(ConfigError::Validation(
            "report_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates audit configuration
fn validate_audit_config(config: &AuditConfig) -> Result<(), ConfigError> {
    if config.enabled && config.required_tags.is_empty() {
        return Err(ConfigError::Validation(
            "required_tags cannot be empty when the audit is enabled".to_string(),
        ));
    }

    for tag in &config.required_tags {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ConfigError::Validation(format!(
                "Invalid tag name in required_tags: '{}'",
                tag
            )));
        }
    }

    Ok(())
}

/// An extension is empty, or a dot followed by ASCII letters and digits
fn validate_extension(ext: &str) -> Result<(), ConfigError> {
    if ext.is_empty() {
        return Ok(());
    }

    match ext.strip_prefix('.') {
        Some(rest) if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()) => {
            Ok(())
        }
        _ => Err(ConfigError::Validation(format!(
            "file_extension must look like '.html', got '{}'",
            ext
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension(".html").is_ok());
        assert!(validate_extension(".htm5").is_ok());
        assert!(validate_extension("").is_ok());

        assert!(validate_extension("html").is_err());
        assert!(validate_extension(".").is_err());
        assert!(validate_extension("./x").is_err());
        assert!(validate_extension("./../x").is_err());
    }

    #[test]
    fn test_crawler_name_rules() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "bad name".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = "good-name".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_contact_url_must_parse() {
        let mut config = Config::default();
        config.user_agent.contact_url = Some("not a url".to_string());
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_concurrency_bounds() {
        let mut config = Config::default();
        config.crawler.max_concurrent_requests = 101;
        assert!(validate(&config).is_err());
        config.crawler.max_concurrent_requests = 1;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_depth_allowed() {
        let mut config = Config::default();
        config.crawler.max_depth = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_required_tags_rules() {
        let mut config = Config::default();
        config.audit.required_tags = vec![];
        assert!(validate(&config).is_err());

        config.audit.enabled = false;
        assert!(validate(&config).is_ok());

        config.audit.required_tags = vec!["<div>".to_string()];
        assert!(validate(&config).is_err());
    }
}
