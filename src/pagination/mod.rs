//! Page discovery for GitHub collections.
//!
//! Link headers look like:
//! `<https://api.github.com/user/1/repos?per_page=2&page=2>; rel="next", <...&page=7>; rel="last"`

use crate::{Error, Result};
use serde_json::Value;
use url::Url;

/// One `<url>; rel="..."` entry whose URL carried a usable page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub rel: String,
    pub page: u32,
}

/// Parse a Link header into its page-carrying relations.
///
/// Entries without a URL, without a `rel`, or whose `page` query parameter is
/// missing, non-numeric or zero are dropped.
pub fn parse_link_header(link_header: &str) -> Vec<PageLink> {
    link_header
        .split(',')
        .filter_map(|part| {
            let mut url = None;
            let mut rel = None;

            for segment in part.split(';') {
                let segment = segment.trim();
                if let Some(inner) = segment
                    .strip_prefix('<')
                    .and_then(|s| s.strip_suffix('>'))
                {
                    url = Some(inner);
                } else if let Some(value) = segment.strip_prefix("rel=") {
                    rel = Some(value.trim_matches('"'));
                }
            }

            let page = extract_page_from_url(url?)?;
            Some(PageLink {
                rel: rel?.to_string(),
                page,
            })
        })
        .collect()
}

/// Extract the 1-based `page` query parameter from an absolute URL.
fn extract_page_from_url(url: &str) -> Option<u32> {
    let url = Url::parse(url).ok()?;
    let (_, value) = url.query_pairs().find(|(key, _)| key == "page")?;
    value.parse().ok().filter(|page| *page >= 1)
}

/// Total number of pages in the collection.
///
/// This is the largest page index mentioned anywhere in the header. A
/// response without a Link header (or with nothing usable in it) is a
/// single page.
pub fn total_pages(link_header: Option<&str>) -> u32 {
    link_header
        .map(parse_link_header)
        .and_then(|links| links.iter().map(|l| l.page).max())
        .unwrap_or(1)
        .max(1)
}

/// Page indices still to fetch after page 1, in ascending order.
pub fn remaining_pages(link_header: Option<&str>) -> Vec<u32> {
    (2..=total_pages(link_header)).collect()
}

/// Whether a collection with a declared `total_count` has pages beyond
/// `current_page` at `page_size` items per page.
pub fn has_next_page(total_count: u64, page_size: u32, current_page: u32) -> bool {
    total_count > u64::from(page_size) * u64::from(current_page)
}

/// Page parameter to request after `current_page`, if any.
pub fn next_page_param(total_count: u64, page_size: u32, current_page: u32) -> Option<u32> {
    has_next_page(total_count, page_size, current_page).then(|| current_page + 1)
}

/// Validate an untyped page parameter.
///
/// Only positive integers are accepted; strings, floats, null and zero are
/// wiring errors and fail immediately instead of falling back to page 1.
pub fn require_page_number(param: &Value) -> Result<u32> {
    param
        .as_u64()
        .filter(|page| *page >= 1)
        .and_then(|page| u32::try_from(page).ok())
        .ok_or_else(|| Error::InvalidPageParameter(param.to_string()))
}
