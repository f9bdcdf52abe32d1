use crate::errors::InvalidRangeError;

/// Derives the usernames for offsets `start..=end`. Offset 0 is the bare base name.
pub fn expand(base: &str, start: u32, end: u32) -> Result<Vec<String>, InvalidRangeError> {
    if end < start {
        return Err(InvalidRangeError { start, end });
    }
    Ok((start..=end)
        .map(|i| {
            if i == 0 {
                base.to_string()
            } else {
                format!("{base}{i}")
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::expand;
    use crate::errors::InvalidRangeError;

    #[test]
    fn offset_zero_is_the_base_name() {
        assert_eq!(expand("easmr", 0, 0).unwrap(), vec!["easmr".to_string()]);
    }

    #[test]
    fn positive_offsets_append_the_number() {
        assert_eq!(expand("x", 1, 3).unwrap(), vec!["x1", "x2", "x3"]);
        assert_eq!(expand("x", 0, 2).unwrap(), vec!["x", "x1", "x2"]);
    }

    #[test]
    fn length_matches_inclusive_range() {
        for (start, end) in [(0, 0), (0, 5), (4, 9), (10, 10)] {
            let names = expand("user", start, end).unwrap();
            assert_eq!(names.len() as u32, end - start + 1);
        }
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert_eq!(
            expand("x", 3, 1),
            Err(InvalidRangeError { start: 3, end: 1 })
        );
    }
}
