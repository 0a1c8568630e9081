pub mod predictor;

use baccara_store::models::{Pattern, Symbol, SymbolRate, SymbolStreak, PATTERN_LEN};

/// Incrémente le compteur de `key`, en l'ajoutant en fin de liste à sa
/// première apparition. L'ordre d'insertion sert de départage stable pour
/// toutes les sélections "le plus fréquent".
pub(crate) fn bump<K: Copy + PartialEq>(counts: &mut Vec<(K, u32)>, key: K) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key, 1)),
    }
}

/// Premier élément strictement le plus fréquent : à égalité, celui
/// rencontré en premier gagne.
pub(crate) fn most_common<K: Copy + PartialEq>(counts: &[(K, u32)]) -> Option<K> {
    let mut best: Option<(K, u32)> = None;
    for &(key, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}

pub fn symbol_counts(history: &[Symbol]) -> Vec<(Symbol, u32)> {
    let mut counts = Vec::new();
    for &symbol in history {
        bump(&mut counts, symbol);
    }
    counts
}

pub fn win_rates(history: &[Symbol]) -> Vec<SymbolRate> {
    let total = history.len();
    Symbol::ALL
        .iter()
        .map(|&symbol| {
            let count = history.iter().filter(|&&s| s == symbol).count() as u32;
            let rate = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            SymbolRate {
                symbol,
                count,
                rate,
            }
        })
        .collect()
}

/// Plus longue série consécutive par symbole, en un seul parcours qui suit
/// en parallèle la série courante et la série maximale de chaque symbole.
pub fn max_streaks(history: &[Symbol]) -> Vec<SymbolStreak> {
    let mut current = [0u32; 3];
    let mut max = [0u32; 3];

    for &symbol in history {
        for (i, &candidate) in Symbol::ALL.iter().enumerate() {
            if symbol == candidate {
                current[i] += 1;
                max[i] = max[i].max(current[i]);
            } else {
                current[i] = 0;
            }
        }
    }

    Symbol::ALL
        .iter()
        .zip(max.iter())
        .map(|(&symbol, &max_streak)| SymbolStreak { symbol, max_streak })
        .collect()
}

/// Compte toutes les fenêtres glissantes de 3 symboles et retourne les `k`
/// plus fréquentes. À égalité, l'ordre de première apparition est conservé.
pub fn common_patterns(history: &[Symbol], k: usize) -> Vec<(Pattern, u32)> {
    let mut counts: Vec<(Pattern, u32)> = Vec::new();
    for window in history.windows(PATTERN_LEN) {
        bump(&mut counts, [window[0], window[1], window[2]]);
    }
    // Tri stable : les ex æquo restent dans l'ordre de première apparition
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(k);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use baccara_store::models::Symbol::{Banker as B, Player as P, Tie as T};

    #[test]
    fn test_symbol_counts_insertion_order() {
        let counts = symbol_counts(&[B, P, B, T]);
        assert_eq!(counts, vec![(B, 2), (P, 1), (T, 1)]);
    }

    #[test]
    fn test_most_common_tie_keeps_first_seen() {
        assert_eq!(most_common(&[(B, 2), (P, 2), (T, 1)]), Some(B));
        assert_eq!(most_common(&[(T, 1), (P, 3)]), Some(P));
        assert_eq!(most_common::<Symbol>(&[]), None);
    }

    #[test]
    fn test_win_rates() {
        // {P:5, B:3, T:2} sur 10 résultats → 50.0 / 30.0 / 20.0
        let mut history = vec![P; 5];
        history.extend(vec![B; 3]);
        history.extend(vec![T; 2]);

        let rates = win_rates(&history);
        assert_eq!(rates[0].count, 5);
        assert!((rates[0].rate - 50.0).abs() < 1e-10);
        assert!((rates[1].rate - 30.0).abs() < 1e-10);
        assert!((rates[2].rate - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_win_rates_empty() {
        let rates = win_rates(&[]);
        assert_eq!(rates.len(), 3);
        assert!(rates.iter().all(|r| r.count == 0 && r.rate == 0.0));
    }

    #[test]
    fn test_max_streaks() {
        // La série de 3 P est interrompue par le B, elle ne fusionne pas
        let streaks = max_streaks(&[P, P, B, P, P, P, T]);
        assert_eq!(streaks[0].max_streak, 3);
        assert_eq!(streaks[1].max_streak, 1);
        assert_eq!(streaks[2].max_streak, 1);
    }

    #[test]
    fn test_max_streaks_empty() {
        assert!(max_streaks(&[]).iter().all(|s| s.max_streak == 0));
    }

    #[test]
    fn test_common_patterns() {
        // Fenêtres : PBP, BPB, PBP → PBP:2, BPB:1
        let patterns = common_patterns(&[P, B, P, B, P], 3);
        assert_eq!(patterns, vec![([P, B, P], 2), ([B, P, B], 1)]);
    }

    #[test]
    fn test_common_patterns_tie_order_and_truncation() {
        // Toutes les fenêtres distinctes : l'ordre de première apparition est gardé
        let patterns = common_patterns(&[P, B, T, P, B], 2);
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].0, [P, B, T]);
        assert_eq!(patterns[1].0, [B, T, P]);
    }

    #[test]
    fn test_common_patterns_short_history() {
        assert!(common_patterns(&[P, B], 3).is_empty());
        assert!(common_patterns(&[], 3).is_empty());
    }
}
