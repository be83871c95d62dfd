//! Catchup listing fetch
//!
//! Requests the previous day's submissions for one archive from the arXiv
//! catchup page and hands the HTML to the listing parser.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use tracing::{debug, warn};

use crate::{create_client, parse_listing, FetchConfig, FetchError};
use paperwatch_core::PaperRecord;

/// The listing date a run covers by default: yesterday, UTC
pub fn default_target_date() -> NaiveDate {
    Utc::now().date_naive() - Duration::days(1)
}

/// arXiv announces no new papers on Saturdays and Sundays
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Fetch and parse the catchup listing for one archive and date
pub async fn fetch_catchup(
    archive: &str,
    date: NaiveDate,
    config: &FetchConfig,
) -> Result<Vec<PaperRecord>, FetchError> {
    let client = create_client(config)?;
    let url = format!("{}/catchup", config.base_url);

    debug!("fetching catchup for {} on {}", archive, date);

    let response = client
        .get(&url)
        .query(&[
            ("archive", archive),
            ("sday", &date.day().to_string()),
            ("smonth", &date.month().to_string()),
            ("syear", &date.year().to_string()),
            ("method", "with"),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        warn!("catchup for {} returned status {}", archive, status);
        return Err(FetchError::Status(status.as_u16()));
    }

    let html = response.text().await?;
    let papers = parse_listing(&html)?;

    debug!("catchup for {} listed {} papers", archive, papers.len());
    Ok(papers)
}
