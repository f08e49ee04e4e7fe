// Shared pagination contract
//
// Both read operations of the query surface validate their requests through
// `page_bounds`. No ordering guarantee is made across calls if the
// underlying collection mutates between them; callers wanting a consistent
// multi-call view must pin their own fixed point.

use std::ops::Range;

use curio_types::{RegistryError, RegistryResult};

/// Hard cap on a single page, and on the aggregate work one call may
/// request.
pub const MAX_PAGE_SIZE: u64 = 1000;

/// Resolve a page request against `total` items.
///
/// Rules, in order:
/// - `size` above `cap` is `PageTooLarge`.
/// - with `total == 0`, only page 0 is valid and resolves to an empty range.
/// - otherwise `page * size` must be strictly below `total`, else
///   `OutOfBounds`.
/// - the resolved length is `min(size, total - page * size)`; the last page
///   is short, never padded.
pub fn page_bounds(total: u64, page: u64, size: u64, cap: u64) -> RegistryResult<Range<u64>> {
    if size > cap {
        return Err(RegistryError::PageTooLarge { requested: size, cap });
    }

    if total == 0 {
        if page != 0 {
            return Err(RegistryError::OutOfBounds { page, size, total });
        }
        return Ok(0..0);
    }

    // Treat multiplication overflow as a start far past the total.
    let start = match page.checked_mul(size) {
        Some(start) if start < total => start,
        _ => return Err(RegistryError::OutOfBounds { page, size, total }),
    };

    let len = size.min(total - start);
    Ok(start..start + len)
}
