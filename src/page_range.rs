use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::PageRangeError;

static PAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").unwrap());

/// One comma-separated token of a page-range expression, in 1-based page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRange {
    Single(u64),
    Span(u64, u64),
}

impl PageRange {
    /// Classify a trimmed token as "n" or "a-b"; bounds are not checked here.
    pub fn parse(token: &str) -> Result<Self, PageRangeError> {
        if PAGE_RE.is_match(token) {
            return Ok(PageRange::Single(parse_number(token)));
        }
        match RANGE_RE.captures(token) {
            Some(caps) => Ok(PageRange::Span(
                parse_number(&caps[1]),
                parse_number(&caps[2]),
            )),
            None => Err(PageRangeError::Malformed {
                token: token.to_string(),
            }),
        }
    }

    /// Validate against a document of `page_count` pages and return the
    /// 0-based indices covered by this token.
    pub fn expand(&self, page_count: u32) -> Result<RangeInclusive<u32>, PageRangeError> {
        let max = u64::from(page_count);
        match *self {
            PageRange::Single(page) => {
                if page < 1 || page > max {
                    return Err(PageRangeError::OutOfRange { page, page_count });
                }
                let index = (page - 1) as u32;
                Ok(index..=index)
            }
            PageRange::Span(start, end) => {
                if start > end {
                    return Err(PageRangeError::InvertedRange {
                        token: self.to_string(),
                        start,
                        end,
                    });
                }
                if start < 1 || end > max {
                    return Err(PageRangeError::RangeOutOfBounds {
                        token: self.to_string(),
                        page_count,
                    });
                }
                Ok((start - 1) as u32..=(end - 1) as u32)
            }
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRange::Single(page) => write!(f, "{}", page),
            PageRange::Span(start, end) => write!(f, "{}-{}", start, end),
        }
    }
}

// Digit runs too long for u64 are still numbers; saturate so they fail the bounds check.
fn parse_number(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

/// A deduplicated set of 0-based page indices, always iterated in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSet(BTreeSet<u32>);

impl PageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: u32) -> bool {
        self.0.insert(index)
    }

    /// Select `index` if it is not selected, deselect it otherwise.
    /// Returns whether the page is selected afterwards.
    pub fn toggle(&mut self, index: u32) -> bool {
        if self.0.remove(&index) {
            false
        } else {
            self.0.insert(index);
            true
        }
    }

    pub fn contains(&self, index: u32) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for PageSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        PageSet(iter.into_iter().collect())
    }
}

impl fmt::Display for PageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_page_set(self))
    }
}

/// Parse an expression like "1,3-5" against a document of `page_count` pages.
///
/// Blank input yields an empty set. Tokens may overlap or appear in any order;
/// the result is their union.
pub fn parse_page_set(spec: &str, page_count: u32) -> Result<PageSet, PageRangeError> {
    let mut pages = PageSet::new();
    for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let range = PageRange::parse(token)?;
        for index in range.expand(page_count)? {
            pages.insert(index);
        }
    }
    Ok(pages)
}

/// Render a page set in its shortest form, merging consecutive pages into
/// "a-b" spans: `{0, 1, 2, 4}` becomes "1-3,5".
pub fn format_page_set(pages: &PageSet) -> String {
    let mut runs: Vec<(u64, u64)> = Vec::new();
    for page in pages.iter().map(|i| u64::from(i) + 1) {
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == page => *end = page,
            _ => runs.push((page, page)),
        }
    }
    runs.into_iter()
        .map(|(start, end)| {
            if start == end {
                PageRange::Single(start).to_string()
            } else {
                PageRange::Span(start, end).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
