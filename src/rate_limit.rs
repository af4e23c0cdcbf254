//! Rate limiting simplifié avec dashmap: un compteur par clé, remis à zéro
//! après une fenêtre de 60 secondes.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use once_cell::sync::Lazy;

static RATE_LIMIT_CACHE: Lazy<DashMap<String, (AtomicU32, Instant)>> = Lazy::new(DashMap::new);

const FENETRE: Duration = Duration::from_secs(60);

/// Vrai si la requête reste dans le budget par minute pour cette clé.
pub fn autoriser(cle: &str, budget_par_minute: u32) -> bool {
    let now = Instant::now();
    let mut entry = RATE_LIMIT_CACHE
        .entry(cle.to_string())
        .or_insert_with(|| (AtomicU32::new(0), now));

    // Nettoyer si plus d'une minute
    if now.duration_since(entry.1) > FENETRE {
        entry.0.store(0, Ordering::Relaxed);
        entry.1 = now;
    }

    entry.0.fetch_add(1, Ordering::Relaxed) < budget_par_minute
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_respecte() {
        let cle = "test:budget_respecte";
        for _ in 0..5 {
            assert!(autoriser(cle, 5));
        }
        assert!(!autoriser(cle, 5));
        assert!(!autoriser(cle, 5));
    }

    #[test]
    fn cles_independantes() {
        assert!(autoriser("test:cle_a", 1));
        assert!(autoriser("test:cle_b", 1));
        assert!(!autoriser("test:cle_a", 1));
    }
}
