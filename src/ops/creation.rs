use rand::Rng;

use crate::model::ItemId;

/// Prefix of client-generated ids
pub const TEMP_ID_PREFIX: &str = "new_";

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// An optimistic creation waiting for the server to assign a real id.
/// Lives only for one round trip; nothing about it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCreation {
    pub temp_id: ItemId,
    pub name: String,
}

/// How a creation round trip ended
#[derive(Debug)]
pub enum Resolution {
    Created(ItemId),
    Failed(CreationError),
}

/// Failure of a creation request. Never fatal: the temporary id stays.
#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error("invalid creation endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),
    #[error("response has no usable id")]
    MissingId,
    #[error("request timed out after {0} ms")]
    Timeout(u64),
}

/// Generate `new_<unix-millis>_<9 base-36 chars>`, retrying while `taken` says
/// the candidate is already in use.
pub fn generate_temp_id(taken: impl Fn(&ItemId) -> bool) -> ItemId {
    let mut rng = rand::rng();
    loop {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
            .collect();
        let raw = format!(
            "{}{}_{}",
            TEMP_ID_PREFIX,
            chrono::Utc::now().timestamp_millis(),
            suffix
        );
        if let Some(id) = ItemId::parse(&raw)
            && !taken(&id)
        {
            return id;
        }
    }
}

/// True for ids minted by [`generate_temp_id`]
pub fn is_temp_id(id: &ItemId) -> bool {
    id.as_str().starts_with(TEMP_ID_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_temp_id_shape() {
        let id = generate_temp_id(|_| false);
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "new");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert!(is_temp_id(&id));
    }

    #[test]
    fn test_temp_id_retries_on_collision() {
        let calls = Cell::new(0);
        let id = generate_temp_id(|_| {
            calls.set(calls.get() + 1);
            calls.get() < 3
        });
        assert_eq!(calls.get(), 3);
        assert!(is_temp_id(&id));
    }

    #[test]
    fn test_is_temp_id() {
        assert!(!is_temp_id(&ItemId::from(12u64)));
    }
}
