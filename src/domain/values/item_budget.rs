use std::sync::atomic::{AtomicUsize, Ordering};

/// Cooperative item-count ceiling for one crawl run. Workers claim a slot
/// between fetches; when the budget is exhausted the run winds down
/// gracefully, in-flight fetches are allowed to complete.
#[derive(Debug)]
pub struct ItemBudget {
    ceiling: usize,
    claimed: AtomicUsize,
}

impl ItemBudget {
    pub fn new(ceiling: usize) -> Self {
        Self {
            ceiling,
            claimed: AtomicUsize::new(0),
        }
    }

    /// Claim one emission slot. Returns false once the ceiling is reached.
    pub fn try_claim(&self) -> bool {
        self.claimed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                if n < self.ceiling {
                    Some(n + 1)
                } else {
                    None
                }
            })
            .is_ok()
    }

    pub fn exhausted(&self) -> bool {
        self.claimed.load(Ordering::SeqCst) >= self.ceiling
    }

    pub fn claimed(&self) -> usize {
        self.claimed.load(Ordering::SeqCst)
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_stop_at_ceiling() {
        let budget = ItemBudget::new(3);
        assert!(budget.try_claim());
        assert!(budget.try_claim());
        assert!(budget.try_claim());
        assert!(!budget.try_claim());
        assert!(budget.exhausted());
        assert_eq!(budget.claimed(), 3);
    }

    #[test]
    fn zero_ceiling_admits_nothing() {
        let budget = ItemBudget::new(0);
        assert!(!budget.try_claim());
        assert!(budget.exhausted());
    }
}
