use heapless::String as HeaplessString;
use std::str::FromStr;

/// Copies `value` into a bounded string, failing instead of truncating.
pub fn to_heapless<const N: usize>(
    value: &str,
    field_name: &str,
) -> Result<HeaplessString<N>, String> {
    HeaplessString::from_str(value)
        .map_err(|_| format!("Value for field '{field_name}' is too long (max {N} bytes)"))
}

/// Optional variant of [`to_heapless`].
pub fn to_optional_heapless<const N: usize>(
    value: Option<&str>,
    field_name: &str,
) -> Result<Option<HeaplessString<N>>, String> {
    value.map(|v| to_heapless(v, field_name)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_heapless_rejects_overflow() {
        let ok: HeaplessString<5> = to_heapless("abcde", "code").unwrap();
        assert_eq!(ok.as_str(), "abcde");

        let err = to_heapless::<5>("abcdef", "code").unwrap_err();
        assert!(err.contains("'code'"));
    }

    #[test]
    fn test_to_optional_heapless_passes_none_through() {
        assert_eq!(to_optional_heapless::<5>(None, "code"), Ok(None));
    }
}
