/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Timestamp for a record update: now, but never earlier than `previous + 1`
///
/// Two updates inside the same millisecond still yield increasing values.
pub fn advance_millis(previous: i64) -> i64 {
    now_millis().max(previous.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_millis_is_strict() {
        let now = now_millis();
        assert!(advance_millis(now) > now);
        assert!(advance_millis(0) >= now);

        let future = now + 60_000;
        assert_eq!(advance_millis(future), future + 1);
    }
}
