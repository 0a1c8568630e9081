use baccara_store::models::{Prediction, PredictionBasis, Symbol, PATTERN_LEN};

use super::{bump, most_common, symbol_counts};

/// Prédiction naïve du prochain résultat.
///
/// La fenêtre des 3 derniers symboles est comparée à toutes les fenêtres de
/// l'historique suivies d'un symbole ; chaque correspondance vote pour le
/// symbole qui la suivait. Sans correspondance, repli sur le symbole
/// globalement le plus fréquent de tout l'historique.
pub fn predict_next(history: &[Symbol]) -> Option<Prediction> {
    if history.len() < PATTERN_LEN {
        return None;
    }

    let query = &history[history.len() - PATTERN_LEN..];

    // La dernière fenêtre (la requête elle-même) n'a pas de suivant.
    let mut followers: Vec<(Symbol, u32)> = Vec::new();
    let mut matches = 0u32;
    for i in 0..history.len() - PATTERN_LEN {
        if &history[i..i + PATTERN_LEN] == query {
            matches += 1;
            bump(&mut followers, history[i + PATTERN_LEN]);
        }
    }

    if matches > 0 {
        let symbol = most_common(&followers)?;
        let confidence = matches as f64 / history.len() as f64 * 100.0;
        Some(Prediction {
            symbol,
            basis: PredictionBasis::Pattern {
                matches,
                confidence,
            },
        })
    } else {
        let symbol = most_common(&symbol_counts(history))?;
        Some(Prediction {
            symbol,
            basis: PredictionBasis::Frequency,
        })
    }
}
