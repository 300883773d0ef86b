/// 입력 칸의 문자열을 유한한 실수로 해석한다.
///
/// 빈 칸, 숫자가 아닌 문자열, `inf`/`NaN`은 모두 `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 0보다 큰 유한 실수만 허용한다.
pub fn parse_positive(text: &str) -> Option<f64> {
    parse_number(text).filter(|v| *v > 0.0)
}
