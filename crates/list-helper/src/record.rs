//! Blog records as seen by the aggregation functions.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Anything that can be aggregated: an author key and a like count.
pub trait Post {
    /// Grouping key.
    fn author(&self) -> &str;
    /// Like count, never negative.
    fn likes(&self) -> u64;
}

impl<P: Post + ?Sized> Post for &P {
    fn author(&self) -> &str {
        (**self).author()
    }

    fn likes(&self) -> u64 {
        (**self).likes()
    }
}

/// Minimal blog shape accepted from JSON input.
///
/// Deserialisation never fails on the two known fields: a missing or `null`
/// author becomes `""`, and a missing, `null`, negative, fractional or
/// non-numeric `likes` becomes `0`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecord {
    #[serde(default, deserialize_with = "lenient_author")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient_likes")]
    pub likes: u64,
}

impl BlogRecord {
    pub fn new(author: impl Into<String>, likes: u64) -> Self {
        Self {
            author: author.into(),
            likes,
        }
    }
}

impl Post for BlogRecord {
    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}

fn lenient_author<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(author)) => author,
        _ => String::new(),
    })
}

fn lenient_likes<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(likes_from_value).unwrap_or(0))
}

fn likes_from_value(value: &Value) -> u64 {
    let Value::Number(number) = value else {
        return 0;
    };

    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        })
        .unwrap_or(0)
}
