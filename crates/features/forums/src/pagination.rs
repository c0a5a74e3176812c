//! Page slicing for thread pages and forum listings.
//!
//! On a thread page the original post occupies the first slot of page one, so
//! page one shows `page_size - 1` replies and every later page is shifted back by one.

use agora_kernel::domain::forums::Reply;
use std::num::NonZeroUsize;

/// One page of items plus the index of the last page (always at least 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub last_page: usize,
}

/// Visible replies of a thread for `page` (1-based).
///
/// Soft-deleted replies are dropped before slicing and counting; the rest are
/// ordered by creation time, keeping storage order for equal timestamps. A page
/// past the end is empty, however far past. Page `0` is treated as page `1`.
#[must_use]
pub fn paginate_replies(replies: &[Reply], page: usize, page_size: NonZeroUsize) -> Page<&Reply> {
    let page = page.max(1);
    let size = page_size.get();

    let mut visible: Vec<&Reply> = replies.iter().filter(|reply| !reply.is_deleted).collect();
    visible.sort_by_key(|reply| reply.created_at);

    let last_page = (visible.len() + 1).div_ceil(size).max(1);
    let Some(offset) = size.checked_mul(page - 1) else {
        return Page { items: Vec::new(), current_page: page, last_page };
    };
    let skip = offset.saturating_sub(1);
    let take = if page == 1 { size - 1 } else { size };

    Page {
        items: visible.into_iter().skip(skip).take(take).collect(),
        current_page: page,
        last_page,
    }
}

/// Ordinary pagination: `page_size` items per page, no reserved slot.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: NonZeroUsize) -> Page<T> {
    let page = page.max(1);
    let size = page_size.get();
    let last_page = items.len().div_ceil(size).max(1);
    let Some(skip) = size.checked_mul(page - 1) else {
        return Page { items: Vec::new(), current_page: page, last_page };
    };

    Page {
        items: items.into_iter().skip(skip).take(size).collect(),
        current_page: page,
        last_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn ordinary_pagination_has_no_reserved_slot() {
        let page = paginate((1..=7).collect(), 2, size(3));
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.last_page, 3);

        let empty = paginate(Vec::<u8>::new(), 1, size(3));
        assert!(empty.items.is_empty());
        assert_eq!(empty.last_page, 1);

        assert!(paginate((1..=7).collect::<Vec<_>>(), 4, size(3)).items.is_empty());
    }

    #[test]
    fn page_size_one_leaves_page_one_for_the_original_post() {
        let page = paginate_replies(&[], 1, size(1));
        assert!(page.items.is_empty());
        assert_eq!(page.last_page, 1);
    }
}
