use std::path::Path;

use anyhow::Result;

use baccara_store::models::{
    ExportDocument, ExportStatLine, HistoryState, Pattern, Prediction, PredictionStats,
    SessionState, Symbol, DISPLAY_WINDOW, PATTERN_LEN,
};
use baccara_store::store::{load_history, load_session, save_history, save_session};

use crate::analysis;
use crate::analysis::predictor::predict_next;

/// Journal des résultats et prédicteur : fenêtre d'affichage, historique
/// complet et prédiction en attente. La prédiction n'est jamais persistée,
/// elle est recalculée depuis l'historique à l'ouverture.
pub struct Session {
    session: SessionState,
    history: HistoryState,
    current_prediction: Option<Prediction>,
}

pub struct RecordReport {
    /// `Some(true)` si une prédiction était en attente et s'est vérifiée.
    pub scored: Option<bool>,
    pub prediction: Option<Prediction>,
}

impl Session {
    pub fn new(session: SessionState, history: HistoryState) -> Session {
        let current_prediction = predict_next(&history.results);
        let mut session = Session {
            session,
            history,
            current_prediction,
        };
        session.truncate_display();
        session
    }

    /// Charge les deux magasins. Un fichier absent donne l'état vide ; un
    /// fichier illisible est signalé puis ignoré (on repart de zéro, rien
    /// n'est fatal).
    pub fn open(session_path: &Path, history_path: &Path) -> Session {
        let session = match load_session(session_path) {
            Ok(Some(state)) => state,
            Ok(None) => SessionState::default(),
            Err(e) => {
                eprintln!("Attention : session ignorée : {e:#}");
                SessionState::default()
            }
        };
        let history = match load_history(history_path) {
            Ok(Some(state)) => state,
            Ok(None) => HistoryState::default(),
            Err(e) => {
                eprintln!("Attention : historique ignoré : {e:#}");
                HistoryState::default()
            }
        };
        Session::new(session, history)
    }

    /// Enregistre un résultat : score la prédiction en attente le cas
    /// échéant, ajoute le résultat horodaté à l'historique complet et à la
    /// fenêtre d'affichage, archive le motif courant puis recalcule la
    /// prédiction du prochain tour.
    pub fn record(&mut self, symbol: Symbol) -> RecordReport {
        let scored = self.current_prediction.map(|prediction| {
            let hit = prediction.symbol == symbol;
            self.session.prediction_stats.score(hit);
            hit
        });

        self.history.results.push(symbol);
        self.history.timestamps.push(timestamp_now());

        self.session.results.push(symbol);
        self.truncate_display();

        if self.session.results.len() >= PATTERN_LEN {
            let tail = &self.session.results[self.session.results.len() - PATTERN_LEN..];
            self.session.patterns.push([tail[0], tail[1], tail[2]]);
        }

        self.current_prediction = predict_next(&self.history.results);

        RecordReport {
            scored,
            prediction: self.current_prediction,
        }
    }

    pub fn persist(&self, session_path: &Path, history_path: &Path) -> Result<()> {
        save_session(session_path, &self.session)?;
        save_history(history_path, &self.history)?;
        Ok(())
    }

    /// Vide la fenêtre d'affichage, la liste d'audit des motifs et les
    /// compteurs de prédiction. L'historique complet n'est pas touché : les
    /// prédictions suivantes restent informées par les sessions précédentes.
    pub fn clear_session(&mut self) {
        self.session = SessionState::default();
        self.current_prediction = None;
    }

    /// Prédiction recalculée depuis l'historique complet à chaque appel.
    pub fn predict(&self) -> Option<Prediction> {
        predict_next(&self.history.results)
    }

    pub fn export(&self) -> ExportDocument {
        let rates = analysis::win_rates(&self.history.results);
        let streaks = analysis::max_streaks(&self.history.results);
        let statistics = rates
            .iter()
            .zip(streaks.iter())
            .map(|(rate, streak)| ExportStatLine {
                symbol: rate.symbol,
                win_rate: format!("{:.1}%", rate.rate),
                max_streak: streak.max_streak.to_string(),
            })
            .collect();

        ExportDocument {
            results: self.history.results.clone(),
            timestamps: self.history.timestamps.clone(),
            statistics,
            prediction_stats: self.session.prediction_stats,
        }
    }

    pub fn display_results(&self) -> &[Symbol] {
        &self.session.results
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.session.patterns
    }

    pub fn prediction_stats(&self) -> &PredictionStats {
        &self.session.prediction_stats
    }

    pub fn history_results(&self) -> &[Symbol] {
        &self.history.results
    }

    pub fn history_len(&self) -> usize {
        self.history.results.len()
    }

    pub fn current_prediction(&self) -> Option<Prediction> {
        self.current_prediction
    }

    fn truncate_display(&mut self) {
        if self.session.results.len() > DISPLAY_WINDOW {
            let excess = self.session.results.len() - DISPLAY_WINDOW;
            self.session.results.drain(..excess);
        }
    }
}

fn timestamp_now() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
