//! Page window arithmetic over an already-filtered commit sequence.

/// One page of `items` plus the facts the UI needs to render paging controls.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Selects page `page` (1-based) of size `page_size` from `all`.
///
/// Pages past the end are not an error; they come back empty with
/// `has_next == false`. Zero page numbers and sizes are treated as 1.
pub fn paginate<T>(all: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page = page.max(1);
    let page_size = page_size.max(1);

    let total = all.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let skip = (page - 1).saturating_mul(page_size);

    let items = if skip >= total {
        &all[..0]
    } else {
        let end = skip.saturating_add(page_size).min(total);
        &all[skip..end]
    };

    Page {
        items,
        total,
        total_pages,
        has_next: page < total_pages,
        has_previous: page > 1,
    }
}
