use serde_json::Value;
use std::fmt;

use crate::error::TrackError;

/// Largest integer an f64 holds exactly (2^53 - 1)
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_991.0;

/// Identifier of the tracked site, any non-zero integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiteId(i64);

impl SiteId {
    pub fn new(id: i64) -> Option<Self> {
        (id != 0).then_some(Self(id))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a site id taken from untyped page configuration
///
/// Only JSON numbers with an integral, non-zero value are accepted.
/// Numeric strings such as `"3"` are rejected.
impl TryFrom<&Value> for SiteId {
    type Error = TrackError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let invalid = || TrackError::InvalidSiteId(value.to_string());

        let Value::Number(number) = value else {
            return Err(invalid());
        };

        if let Some(id) = number.as_i64() {
            return SiteId::new(id).ok_or_else(invalid);
        }

        match number.as_f64() {
            Some(f)
                if f.fract() == 0.0
                    && f != 0.0
                    && (-MAX_EXACT_FLOAT_INT..=MAX_EXACT_FLOAT_INT).contains(&f) =>
            {
                Ok(SiteId(f as i64))
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_non_zero_integers() {
        assert_eq!(SiteId::try_from(&json!(3)).unwrap().get(), 3);
        assert_eq!(SiteId::try_from(&json!(4294967296u64)).unwrap().get(), 4294967296);
        assert_eq!(SiteId::try_from(&json!(7.0)).unwrap().get(), 7);
    }

    #[test]
    fn test_accepts_negative_integers() {
        assert_eq!(SiteId::try_from(&json!(-3)).unwrap().get(), -3);
        assert_eq!(SiteId::try_from(&json!(-8.0)).unwrap().get(), -8);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for value in [
            json!(0),
            json!(0.0),
            json!(3.5),
            json!(-2.5),
            json!(u64::MAX),
            json!("3"),
            json!("abc"),
            json!(null),
            json!(true),
            json!([1]),
            json!({"id": 1}),
        ] {
            assert!(
                matches!(SiteId::try_from(&value), Err(TrackError::InvalidSiteId(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_names_the_value() {
        let err = SiteId::try_from(&json!("abc")).unwrap_err();
        assert_eq!(err.to_string(), r#"site id "abc" is not a valid integer"#);
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(SiteId::new(0).is_none());
        assert_eq!(SiteId::new(-1).map(|id| id.get()), Some(-1));
        assert_eq!(SiteId::new(12).map(|id| id.to_string()).as_deref(), Some("12"));
    }
}
