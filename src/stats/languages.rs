use crate::normalize::{DetailedRepo, LanguageUsage};
use serde::Serialize;

/// Name of the synthetic bucket that absorbs low-usage languages.
pub const OTHER_LANGUAGE: &str = "Other";

/// Languages below this share of total bytes are collapsed into "Other".
pub const LOW_USAGE_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Share of the original total, 0-100
    pub percent: f64,
}

fn percent_of(bytes: u64, total: u64) -> f64 {
    bytes as f64 / total as f64 * 100.0
}

/// `bytes / total < LOW_USAGE_THRESHOLD`, computed without rounding.
fn is_low_usage(bytes: u64, total: u64) -> bool {
    u128::from(bytes) * 20 < u128::from(total)
}

/// Collapse the long tail of a language breakdown.
///
/// Entries keep their original order; "Other" (if any) comes last. An
/// empty or all-zero breakdown yields an empty result.
pub fn bucket_languages(usage: &LanguageUsage) -> Vec<LanguageShare> {
    let total = usage.total_bytes();
    if total == 0 {
        return Vec::new();
    }

    let mut shares = Vec::with_capacity(usage.len());
    let mut other_bytes = 0u64;

    for (name, bytes) in usage.iter() {
        if is_low_usage(bytes, total) {
            other_bytes += bytes;
        } else {
            shares.push(LanguageShare {
                name: name.to_string(),
                bytes,
                percent: percent_of(bytes, total),
            });
        }
    }

    if other_bytes > 0 {
        shares.push(LanguageShare {
            name: OTHER_LANGUAGE.to_string(),
            bytes: other_bytes,
            percent: percent_of(other_bytes, total),
        });
    }

    shares
}

/// Largest byte count first. Equal entries keep their relative order.
pub fn sort_by_bytes_desc(mut shares: Vec<LanguageShare>) -> Vec<LanguageShare> {
    shares.sort_by(|a, b| b.bytes.cmp(&a.bytes));
    shares
}

/// Turn bucketed shares back into a plain breakdown.
pub fn shares_to_usage(shares: &[LanguageShare]) -> LanguageUsage {
    shares.iter().map(|s| (s.name.as_str(), s.bytes)).collect()
}

/// Sum language bytes across repositories.
pub fn merge_language_usage(repos: &[DetailedRepo]) -> LanguageUsage {
    let mut merged = LanguageUsage::new();
    for repo in repos {
        for (name, bytes) in repo.languages.iter() {
            merged.add(name, bytes);
        }
    }
    merged
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageExtremes {
    pub most_used: (String, u64),
    pub least_used: (String, u64),
}

/// Most and least used language; the first one seen wins a tie.
pub fn language_extremes(usage: &LanguageUsage) -> Option<LanguageExtremes> {
    let mut iter = usage.iter();
    let (first_name, first_bytes) = iter.next()?;
    let mut most = (first_name, first_bytes);
    let mut least = (first_name, first_bytes);

    for (name, bytes) in iter {
        if bytes > most.1 {
            most = (name, bytes);
        }
        if bytes < least.1 {
            least = (name, bytes);
        }
    }

    Some(LanguageExtremes {
        most_used: (most.0.to_string(), most.1),
        least_used: (least.0.to_string(), least.1),
    })
}
