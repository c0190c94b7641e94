//! Pagination state and arithmetic.

use serde::{Deserialize, Serialize};

/// Allowed page sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    /// 10 posts per page.
    #[default]
    Ten,
    /// 20 posts per page.
    Twenty,
    /// 50 posts per page.
    Fifty,
}

impl PageSize {
    /// All sizes in selection order.
    pub const ALL: [Self; 3] = [Self::Ten, Self::Twenty, Self::Fifty];

    /// Returns the numeric size.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
        }
    }

    /// Parses a numeric size; only the fixed allowed set is accepted.
    #[must_use]
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            10 => Some(Self::Ten),
            20 => Some(Self::Twenty),
            50 => Some(Self::Fifty),
            _ => None,
        }
    }

    /// Returns the next size in the cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Ten => Self::Twenty,
            Self::Twenty => Self::Fifty,
            Self::Fifty => Self::Ten,
        }
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Feed sort order over the publication timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Most recently published first.
    #[default]
    NewestFirst,
    /// Oldest published first.
    OldestFirst,
}

impl SortOrder {
    /// Returns the API sort parameter.
    #[must_use]
    pub const fn api_param(self) -> &'static str {
        match self {
            Self::NewestFirst => "-published_at",
            Self::OldestFirst => "published_at",
        }
    }

    /// Parses an API sort parameter.
    #[must_use]
    pub fn from_api_param(value: &str) -> Option<Self> {
        match value {
            "-published_at" => Some(Self::NewestFirst),
            "published_at" => Some(Self::OldestFirst),
            _ => None,
        }
    }

    /// Returns the opposite order.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::NewestFirst => Self::OldestFirst,
            Self::OldestFirst => Self::NewestFirst,
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewestFirst => "Newest",
            Self::OldestFirst => "Oldest",
        }
    }
}

/// One page worth of feed parameters.
///
/// Round-trips with the query-string form `page=<n>&size=<n>&sort=<field>`;
/// unknown or invalid values fall back to defaults when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: u32,
    /// Posts per page.
    pub size: PageSize,
    /// Sort order.
    pub sort: SortOrder,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: PageSize::default(),
            sort: SortOrder::default(),
        }
    }
}

impl PageQuery {
    /// Renders the canonical query string.
    #[must_use]
    pub fn query_string(&self) -> String {
        format!(
            "page={}&size={}&sort={}",
            self.page,
            self.size.as_u32(),
            self.sort.api_param()
        )
    }

    /// Parses a query string leniently, defaulting each invalid component.
    #[must_use]
    pub fn parse_query(query: &str) -> Self {
        let mut result = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "page" => {
                    if let Ok(page) = value.parse::<u32>()
                        && page >= 1
                    {
                        result.page = page;
                    }
                }
                "size" => {
                    if let Some(size) = value.parse().ok().and_then(PageSize::from_u32) {
                        result.size = size;
                    }
                }
                "sort" => {
                    if let Some(sort) = SortOrder::from_api_param(value) {
                        result.sort = sort;
                    }
                }
                _ => {}
            }
        }
        result
    }

    /// Returns the number of pages for `total` items, 0 when the feed is empty.
    #[must_use]
    pub fn total_pages(&self, total: u64) -> u32 {
        let size = u64::from(self.size.as_u32());
        total.div_ceil(size).min(u64::from(u32::MAX)) as u32
    }

    /// Returns the 1-based index of the first displayed item, 0 when empty.
    #[must_use]
    pub fn start_item(&self, total: u64) -> u64 {
        if total == 0 {
            0
        } else {
            u64::from(self.page - 1) * u64::from(self.size.as_u32()) + 1
        }
    }

    /// Returns the 1-based index of the last displayed item.
    #[must_use]
    pub fn end_item(&self, total: u64) -> u64 {
        (u64::from(self.page) * u64::from(self.size.as_u32())).min(total)
    }

    /// Clamps the page down so it stays within range for `total` items.
    ///
    /// Never clamps below page 1, even for an empty feed.
    #[must_use]
    pub fn clamped(mut self, total: u64) -> Self {
        self.page = self.page.min(self.total_pages(total).max(1));
        self
    }

    /// Returns the window of up to five page numbers centered on the current
    /// page, shifted to stay within `1..=total_pages`.
    #[must_use]
    pub fn page_window(&self, total: u64) -> Vec<u32> {
        let total_pages = i64::from(self.total_pages(total));
        let page = i64::from(self.page);

        (0..total_pages.min(5))
            .filter_map(|index| {
                let mut number = index + 1;
                if total_pages > 5 && page > 3 {
                    number = page + index - 2;
                    if page >= total_pages - 2 {
                        number = total_pages - 4 + index;
                    }
                }
                (1..=total_pages).contains(&number).then_some(number as u32)
            })
            .collect()
    }
}
