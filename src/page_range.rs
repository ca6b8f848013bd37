use thiserror::Error;

/// Upper bound on how many pages one expression may expand to.
pub const MAX_SELECTION_PAGES: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Invalid page number: {0}")]
    InvalidPageToken(String),
    #[error("Invalid page range: {0}")]
    InvalidRangeToken(String),
    #[error("Page range {start}-{end} runs backwards")]
    InvalidRangeOrder { start: u32, end: u32 },
    #[error("Selection expands to more than {limit} pages")]
    TooLarge { limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Single(u32),
    Range { start: u32, end: u32 },
}

impl PageToken {
    /// Parse a single token like "7" or "3-5"
    pub fn parse(s: &str) -> Result<Self, SelectionError> {
        let s = s.trim();

        if let Some((start_str, end_str)) = s.split_once('-') {
            // "1-2-3" leaves a dash in the second half
            if end_str.contains('-') {
                return Err(SelectionError::InvalidRangeToken(s.to_string()));
            }

            let start = parse_bound(start_str)
                .ok_or_else(|| SelectionError::InvalidRangeToken(s.to_string()))?;
            let end = parse_bound(end_str)
                .ok_or_else(|| SelectionError::InvalidRangeToken(s.to_string()))?;

            if start > end {
                return Err(SelectionError::InvalidRangeOrder { start, end });
            }

            Ok(PageToken::Range { start, end })
        } else {
            parse_bound(s)
                .map(PageToken::Single)
                .ok_or_else(|| SelectionError::InvalidPageToken(s.to_string()))
        }
    }

    /// Number of pages this token expands to
    pub fn page_count(&self) -> usize {
        match *self {
            PageToken::Single(_) => 1,
            PageToken::Range { start, end } => (end - start) as usize + 1,
        }
    }

    /// Highest page number this token refers to
    pub fn last_page(&self) -> u32 {
        match *self {
            PageToken::Single(n) => n,
            PageToken::Range { end, .. } => end,
        }
    }

    /// Expand into 1-based page numbers, ascending for ranges
    pub fn expand(&self) -> impl Iterator<Item = u32> {
        let (start, end) = match *self {
            PageToken::Single(n) => (n, n),
            PageToken::Range { start, end } => (start, end),
        };
        start..=end
    }
}

/// Page numbers are base-10 and at least 1; signs are rejected.
fn parse_bound(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().filter(|&n| n >= 1)
}

/// Parse a whitespace-separated range expression like "1 3-5 2"
pub fn parse_tokens(s: &str) -> Result<Vec<PageToken>, SelectionError> {
    s.split_whitespace().map(PageToken::parse).collect()
}

/// Expand tokens into page numbers, keeping the operator's order.
///
/// Repeats and non-monotonic orderings are preserved. Page numbers are not
/// checked against any document here; see [`first_page_beyond`].
pub fn expand_tokens(tokens: &[PageToken]) -> Result<Vec<u32>, SelectionError> {
    let too_large = SelectionError::TooLarge {
        limit: MAX_SELECTION_PAGES,
    };

    let mut total: usize = 0;
    for token in tokens {
        total = total
            .checked_add(token.page_count())
            .filter(|&n| n <= MAX_SELECTION_PAGES)
            .ok_or_else(|| too_large.clone())?;
    }

    let mut pages = Vec::with_capacity(total);
    for token in tokens {
        pages.extend(token.expand());
    }
    Ok(pages)
}

/// The first page, in selection order, that lies past `last_page`.
pub fn first_page_beyond(tokens: &[PageToken], last_page: u32) -> Option<u32> {
    tokens.iter().find_map(|token| match *token {
        PageToken::Single(n) if n > last_page => Some(n),
        PageToken::Range { start, end } if end > last_page => {
            Some(start.max(last_page.saturating_add(1)))
        }
        _ => None,
    })
}
