use crate::models::ScoredLead;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Append-only, in-memory ledger of scored leads.
///
/// Appends are serialized behind a single mutex and reads clone a snapshot
/// of the full history. Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct LeadStore {
    leads: Mutex<Vec<ScoredLead>>,
}

impl LeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a lead to the end of the history and returns the new length.
    pub fn append(&self, lead: ScoredLead) -> usize {
        let mut leads = self.lock();
        leads.push(lead);
        leads.len()
    }

    /// Every stored lead, in insertion order.
    pub fn list(&self) -> Vec<ScoredLead> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // push is the only mutation, so a poisoned lock never holds a partial entry.
    fn lock(&self) -> MutexGuard<'_, Vec<ScoredLead>> {
        self.leads.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn scored(email: &str) -> ScoredLead {
        ScoredLead {
            email: email.to_string(),
            initial_score: 50.0,
            reranked_score: 60.0,
            comments: "need it soon".to_string(),
        }
    }

    #[test]
    fn test_append_then_list_preserves_order() {
        let store = LeadStore::new();
        assert!(store.is_empty());

        assert_eq!(store.append(scored("a@example.com")), 1);
        assert_eq!(store.append(scored("b@example.com")), 2);
        assert_eq!(store.append(scored("c@example.com")), 3);

        let emails: Vec<String> = store.list().into_iter().map(|l| l.email).collect();
        assert_eq!(emails, vec!["a@example.com", "b@example.com", "c@example.com"]);
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let store = LeadStore::new();
        store.append(scored("a@example.com"));

        let snapshot = store.list();
        store.append(scored("b@example.com"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let store = Arc::new(LeadStore::new());
        let handles: Vec<_> = (0..8)
            .map(|thread| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        store.append(scored(&format!("t{}-{}@example.com", thread, i)));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let leads = store.list();
        assert_eq!(leads.len(), 800);

        // Each writer's entries keep their relative order.
        for thread in 0..8 {
            let prefix = format!("t{}-", thread);
            let indices: Vec<usize> = leads
                .iter()
                .filter(|l| l.email.starts_with(&prefix))
                .map(|l| {
                    l.email[prefix.len()..]
                        .trim_end_matches("@example.com")
                        .parse()
                        .unwrap()
                })
                .collect();
            assert_eq!(indices, (0..100).collect::<Vec<_>>());
        }
    }
}
