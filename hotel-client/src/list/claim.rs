//! In-flight action registry
//!
//! A record id (or a named slot such as "create") can be claimed by one
//! action at a time. The claim is released when the [`Claim`] drops, so
//! every exit path of an action frees it.

use std::sync::Arc;

use dashmap::DashSet;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<DashSet<String>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim every key or none of them.
    pub fn claim(&self, keys: &[&str]) -> ClientResult<Claim> {
        let mut claim = Claim {
            keys: Arc::clone(&self.keys),
            held: Vec::with_capacity(keys.len()),
        };
        for key in keys {
            if !self.keys.insert((*key).to_string()) {
                // `claim` drops here and releases what it already took
                return Err(ClientError::Busy((*key).to_string()));
            }
            claim.held.push((*key).to_string());
        }
        Ok(claim)
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Keys held by one running action
#[derive(Debug)]
pub struct Claim {
    keys: Arc<DashSet<String>>,
    held: Vec<String>,
}

impl Claim {
    pub fn keys(&self) -> &[String] {
        &self.held
    }
}

impl Drop for Claim {
    fn drop(&mut self) {
        for key in &self.held {
            self.keys.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_and_release() {
        let registry = InFlight::new();
        {
            let claim = registry.claim(&["a", "b"]).unwrap();
            assert_eq!(claim.keys(), &["a".to_string(), "b".to_string()]);
            assert!(registry.is_pending("a"));
            assert!(registry.is_pending("b"));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_second_claim_is_busy() {
        let registry = InFlight::new();
        let _first = registry.claim(&["a"]).unwrap();
        let err = registry.claim(&["a"]).unwrap_err();
        assert!(matches!(err, ClientError::Busy(ref k) if k == "a"));
    }

    #[test]
    fn test_partial_claim_rolls_back() {
        let registry = InFlight::new();
        let _held = registry.claim(&["b"]).unwrap();
        assert!(registry.claim(&["a", "b"]).is_err());
        assert!(!registry.is_pending("a"));
        assert_eq!(registry.len(), 1);
    }
}
