//! Price display formatting.

/// Format a rupee amount with Indian digit grouping.
///
/// The last three digits form one group; every group above that has two
/// digits: `2075000` formats as `"20,75,000"`. Display code relies on this
/// exact grouping, not just the raw number.
#[must_use]
pub fn format_inr(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 2 + 1);
    if value < 0 {
        out.push('-');
    }

    if digits.len() <= 3 {
        out.push_str(&digits);
        return out;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    out.push_str(&groups.join(","));
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::format_inr;
    use insta::assert_snapshot;

    #[test]
    fn groups_like_en_in_locale() {
        assert_snapshot!(format_inr(2_075_000), @"20,75,000");
        assert_snapshot!(format_inr(1_660_000), @"16,60,000");
        assert_snapshot!(format_inr(6_225_000), @"62,25,000");
    }

    #[test]
    fn small_values_keep_plain_grouping() {
        assert_eq!(format_inr(0), "0");
        assert_eq!(format_inr(999), "999");
        assert_eq!(format_inr(1_000), "1,000");
        assert_eq!(format_inr(100_000), "1,00,000");
    }

    #[test]
    fn large_and_negative_values() {
        assert_eq!(format_inr(123_456_789), "12,34,56,789");
        assert_eq!(format_inr(-851_000), "-8,51,000");
    }
}
