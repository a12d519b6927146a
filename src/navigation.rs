//! Index arithmetic for moving between trigger elements.

/// Map a requested index onto `0..len`. Out-of-range requests wrap when
/// `looping`, otherwise they clamp to the nearest end. `None` for an empty set.
pub fn normalize_index(target: i64, len: usize, looping: bool) -> Option<usize> {
    let last = len.checked_sub(1)?;
    let index = if target < 0 {
        if looping {
            last
        } else {
            0
        }
    } else if target as u64 > last as u64 {
        if looping {
            0
        } else {
            last
        }
    } else {
        target as usize
    };
    Some(index)
}

pub fn has_previous(index: i64, len: usize, looping: bool) -> bool {
    len > 1 && (looping || index > 0)
}

pub fn has_next(index: i64, len: usize, looping: bool) -> bool {
    len > 1 && (looping || index < len as i64 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_when_looping() {
        assert_eq!(normalize_index(-1, 4, true), Some(3));
        assert_eq!(normalize_index(4, 4, true), Some(0));
        assert_eq!(normalize_index(2, 4, true), Some(2));
    }

    #[test]
    fn clamps_without_looping() {
        assert_eq!(normalize_index(-1, 4, false), Some(0));
        assert_eq!(normalize_index(9, 4, false), Some(3));
    }

    #[test]
    fn empty_set_has_no_index() {
        assert_eq!(normalize_index(0, 0, true), None);
    }

    #[test]
    fn buttons_need_more_than_one_element() {
        assert!(!has_previous(0, 1, true));
        assert!(!has_next(0, 1, true));
    }

    #[test]
    fn buttons_at_the_edges() {
        assert!(!has_previous(0, 3, false));
        assert!(has_next(0, 3, false));
        assert!(has_previous(2, 3, false));
        assert!(!has_next(2, 3, false));
        assert!(has_previous(0, 3, true));
        assert!(has_next(2, 3, true));
    }
}
