use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::carousel::DEFAULT_AUTOPLAY;
use crate::error::{FeedError, FeedResult};
use crate::feed::FeedConfig;
use crate::source::{DynSource, HttpSource, RssSource, SampleSource, DEFAULT_LATENCY};

#[derive(Parser, Debug)]
#[command(name = "portfolio-feed")]
#[command(about = "A terminal portfolio page with an infinitely scrolling blog feed")]
#[command(version)]
pub struct Cli {
    /// Page source: `sample`, or an http(s) URL serving a JSON array of posts
    #[arg(long, env = "PORTFOLIO_SOURCE", default_value = "sample")]
    pub source: String,

    /// Read posts from an RSS feed instead (takes precedence over --source)
    #[arg(long, env = "PORTFOLIO_RSS")]
    pub rss: Option<String>,

    /// Posts requested per page
    #[arg(long, env = "PORTFOLIO_PAGE_SIZE", default_value_t = FeedConfig::DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Wait for the first scroll or `m` before loading anything
    #[arg(long)]
    pub no_auto_start: bool,

    /// Placeholder rows shown while a page loads
    #[arg(long, default_value_t = FeedConfig::DEFAULT_SKELETONS)]
    pub skeletons: usize,

    /// Simulated latency of the sample source, in milliseconds
    #[arg(long, default_value_t = DEFAULT_LATENCY.as_millis() as u64)]
    pub latency_ms: u64,

    /// JSON file of posts to serve from the sample source
    #[arg(long)]
    pub posts: Option<PathBuf>,

    /// Carousel autoplay interval in milliseconds (0 disables autoplay)
    #[arg(long, default_value_t = DEFAULT_AUTOPLAY.as_millis() as u64)]
    pub autoplay_ms: u64,

    /// Where the theme preference is stored
    #[arg(long, env = "PORTFOLIO_THEME_FILE", default_value = ".portfolio-theme")]
    pub theme_file: PathBuf,

    /// Write logs to this file
    #[arg(long, env = "PORTFOLIO_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Load every page without the UI and print posts as JSON lines
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            page_size: self.page_size,
            auto_start: !self.no_auto_start,
            skeleton_count: self.skeletons,
        }
    }

    pub fn autoplay(&self) -> Option<Duration> {
        (self.autoplay_ms > 0).then(|| Duration::from_millis(self.autoplay_ms))
    }

    /// Build the page source named on the command line.
    pub fn build_source(&self) -> FeedResult<DynSource> {
        if let Some(url) = &self.rss {
            return Ok(Box::new(RssSource::new(url, "RSS")));
        }
        if self.source.starts_with("http://") || self.source.starts_with("https://") {
            return Ok(Box::new(HttpSource::new(&self.source)?));
        }
        if self.source != "sample" {
            return Err(FeedError::UnknownSource(self.source.clone()));
        }

        let sample = match &self.posts {
            Some(path) => SampleSource::from_json_file(path)?,
            None => SampleSource::new(),
        };
        Ok(Box::new(
            sample.latency(Duration::from_millis(self.latency_ms)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PageSource;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["portfolio-feed"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_build_default_feed_config() {
        let cli = parse(&[]);
        assert_eq!(cli.feed_config(), FeedConfig::default());
        assert_eq!(cli.autoplay(), Some(Duration::from_millis(5000)));
        assert!(!cli.headless);
    }

    #[test]
    fn flags_override_feed_config() {
        let cli = parse(&["--page-size", "4", "--no-auto-start", "--skeletons", "2"]);
        let config = cli.feed_config();
        assert_eq!(config.page_size, 4);
        assert!(!config.auto_start);
        assert_eq!(config.skeleton_count, 2);
    }

    #[test]
    fn zero_autoplay_disables_carousel_timer() {
        assert_eq!(parse(&["--autoplay-ms", "0"]).autoplay(), None);
    }

    #[test]
    fn sample_source_by_default() {
        let source = parse(&[]).build_source().unwrap();
        assert_eq!(source.name(), "sample");
    }

    #[test]
    fn url_selects_http_source() {
        let source = parse(&["--source", "https://example.com/posts"])
            .build_source()
            .unwrap();
        assert_eq!(source.name(), "https://example.com/posts");
    }

    #[test]
    fn rss_takes_precedence() {
        let source = parse(&["--source", "https://example.com/posts", "--rss", "https://example.com/feed.xml"])
            .build_source()
            .unwrap();
        assert_eq!(source.name(), "RSS");
    }

    #[test]
    fn unknown_source_is_rejected() {
        for value in ["foo", "htps://example.com/posts", "Sample"] {
            let err = parse(&["--source", value]).build_source().err().unwrap();
            assert!(matches!(err, FeedError::UnknownSource(ref s) if s == value));
            assert!(!err.is_transport());
        }
    }

    #[test]
    fn non_numeric_page_size_is_rejected() {
        assert!(Cli::try_parse_from(["portfolio-feed", "--page-size", "six"]).is_err());
    }
}
