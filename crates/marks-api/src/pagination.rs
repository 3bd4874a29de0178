/// Page window over an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: i64,
    pub total_pages: i64,
}

/// Page size shared by the REST endpoint and the rendered view.
pub const DEFAULT_LIMIT: i64 = 5;

/// Upper bound on caller-supplied page sizes.
pub const MAX_LIMIT: i64 = 100;

/// Window arithmetic: `skip = (page - 1) * limit`,
/// `total_pages = ceil(total / limit)`. No clamping happens here: both query
/// surfaces clamp the page via `page_param` before calling, and a page past
/// the last one yields an empty window from the store.
pub fn paginate(total: i64, page: i64, limit: i64) -> PageWindow {
    let skip = (page - 1) * limit;
    let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
    PageWindow { skip, total_pages }
}

/// Page number from a raw query/form value. Absent or non-numeric input is
/// page 1; values below 1 are clamped so a negative skip never reaches the
/// store. Applied identically by the REST endpoint and the rendered view.
pub fn page_param(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok()).unwrap_or(1).max(1)
}

/// Page size from a raw query value, defaulting to DEFAULT_LIMIT and bounded
/// to 1..=MAX_LIMIT.
pub fn limit_param(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_arithmetic() {
        assert_eq!(paginate(7, 1, 5), PageWindow { skip: 0, total_pages: 2 });
        assert_eq!(paginate(7, 2, 5), PageWindow { skip: 5, total_pages: 2 });
        assert_eq!(paginate(10, 2, 5), PageWindow { skip: 5, total_pages: 2 });
        assert_eq!(paginate(11, 3, 5), PageWindow { skip: 10, total_pages: 3 });
    }

    #[test]
    fn test_zero_total() {
        // ceil(0/5) = 0; the rendered view displays max(total_pages, 1)
        assert_eq!(paginate(0, 1, 5), PageWindow { skip: 0, total_pages: 0 });
    }

    #[test]
    fn test_engine_does_not_clamp() {
        // Out-of-range pages pass through; callers clamp via page_param
        assert_eq!(paginate(7, 5, 5).skip, 20);
        assert_eq!(paginate(7, 0, 5).skip, -5);
    }

    #[test]
    fn test_page_param() {
        assert_eq!(page_param(None), 1);
        assert_eq!(page_param(Some("3")), 3);
        assert_eq!(page_param(Some("abc")), 1);
        assert_eq!(page_param(Some("")), 1);
        assert_eq!(page_param(Some("0")), 1);
        assert_eq!(page_param(Some("-4")), 1);
    }

    #[test]
    fn test_limit_param() {
        assert_eq!(limit_param(None), DEFAULT_LIMIT);
        assert_eq!(limit_param(Some("20")), 20);
        assert_eq!(limit_param(Some("abc")), DEFAULT_LIMIT);
        assert_eq!(limit_param(Some("0")), 1);
        assert_eq!(limit_param(Some("10000")), MAX_LIMIT);
    }
}
