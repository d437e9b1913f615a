use serde::{Deserialize, Serialize};

/// Where a file's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceChannel {
    LocalUpload,
    Youtube,
    FirecrawlBulk,
    FirecrawlSitemap,
    FirecrawlCrawl,
}

impl SourceChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceChannel::LocalUpload => "LOCAL_UPLOAD",
            SourceChannel::Youtube => "YOUTUBE",
            SourceChannel::FirecrawlBulk => "FIRECRAWL_BULK",
            SourceChannel::FirecrawlSitemap => "FIRECRAWL_SITEMAP",
            SourceChannel::FirecrawlCrawl => "FIRECRAWL_CRAWL",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "LOCAL_UPLOAD" => Ok(SourceChannel::LocalUpload),
            "YOUTUBE" => Ok(SourceChannel::Youtube),
            "FIRECRAWL_BULK" => Ok(SourceChannel::FirecrawlBulk),
            "FIRECRAWL_SITEMAP" => Ok(SourceChannel::FirecrawlSitemap),
            "FIRECRAWL_CRAWL" => Ok(SourceChannel::FirecrawlCrawl),
            _ => Err(format!("Invalid source channel: {}", s)),
        }
    }

    pub fn is_web(&self) -> bool {
        matches!(
            self,
            SourceChannel::FirecrawlBulk
                | SourceChannel::FirecrawlSitemap
                | SourceChannel::FirecrawlCrawl
        )
    }
}

impl From<ScrapeJobType> for SourceChannel {
    fn from(job_type: ScrapeJobType) -> Self {
        match job_type {
            ScrapeJobType::Bulk => SourceChannel::FirecrawlBulk,
            ScrapeJobType::Sitemap => SourceChannel::FirecrawlSitemap,
            ScrapeJobType::Crawl => SourceChannel::FirecrawlCrawl,
        }
    }
}

impl std::fmt::Display for SourceChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of external scrape job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrapeJobType {
    Bulk,
    Sitemap,
    Crawl,
}

impl ScrapeJobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapeJobType::Bulk => "BULK",
            ScrapeJobType::Sitemap => "SITEMAP",
            ScrapeJobType::Crawl => "CRAWL",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "BULK" => Ok(ScrapeJobType::Bulk),
            "SITEMAP" => Ok(ScrapeJobType::Sitemap),
            "CRAWL" => Ok(ScrapeJobType::Crawl),
            _ => Err(format!("Invalid scrape job type: {}", s)),
        }
    }
}

impl std::fmt::Display for ScrapeJobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_round_trip() {
        for channel in [
            SourceChannel::LocalUpload,
            SourceChannel::Youtube,
            SourceChannel::FirecrawlBulk,
            SourceChannel::FirecrawlSitemap,
            SourceChannel::FirecrawlCrawl,
        ] {
            assert_eq!(SourceChannel::parse(channel.as_str()).unwrap(), channel);
        }
    }

    #[test]
    fn test_job_type_maps_to_channel() {
        assert_eq!(
            SourceChannel::from(ScrapeJobType::Bulk),
            SourceChannel::FirecrawlBulk
        );
        assert_eq!(
            SourceChannel::from(ScrapeJobType::Sitemap),
            SourceChannel::FirecrawlSitemap
        );
        assert_eq!(
            SourceChannel::from(ScrapeJobType::Crawl),
            SourceChannel::FirecrawlCrawl
        );
    }

    #[test]
    fn test_is_web() {
        assert!(!SourceChannel::LocalUpload.is_web());
        assert!(!SourceChannel::Youtube.is_web());
        assert!(SourceChannel::FirecrawlCrawl.is_web());
    }

    #[test]
    fn test_rejects_unknown() {
        assert!(SourceChannel::parse("FTP").is_err());
        assert!(ScrapeJobType::parse("SINGLE").is_err());
    }
}
