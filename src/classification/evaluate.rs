use std::fmt::{Display, Formatter};

use crate::classification::Predictions;
use crate::error::{ClassifierError, Result};
use crate::vectorizer::document::Document;

/// Outcome of comparing predictions with gold labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    correct: usize,
    total: usize,
}

impl Evaluation {
    /// Count the gold documents whose prediction equals their own topic.
    ///
    /// A gold document without prediction, or without a topic, counts as wrong.
    /// # Errors
    /// * `EmptyGoldSet` - `gold` yields no document
    pub fn compute<'b, D, I>(predictions: &Predictions<'_, D>, gold: I) -> Result<Self>
    where
        D: Document + 'b,
        I: IntoIterator<Item = &'b D>,
    {
        let mut correct = 0;
        let mut total = 0;
        for document in gold {
            total += 1;
            let Some(topic) = document.topic() else {
                log::warn!("gold document from {} has no topic, counted as wrong", document.source());
                continue;
            };
            match predictions.get(document) {
                Some(label) if label == topic => correct += 1,
                Some(_) => {}
                None => log::debug!("no prediction for {}", document.source()),
            }
        }
        if total == 0 {
            return Err(ClassifierError::EmptyGoldSet);
        }
        Ok(Self { correct, total })
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// `correct / total`, in `[0.0, 1.0]`
    pub fn accuracy(&self) -> f64 {
        self.correct as f64 / self.total as f64
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Correct: {:.2} ({:.2}%)", self.accuracy(), self.accuracy() * 100.0)
    }
}

/// Fraction of `gold` whose predicted label equals its topic
pub fn evaluate<'b, D, I>(predictions: &Predictions<'_, D>, gold: I) -> Result<f64>
where
    D: Document + 'b,
    I: IntoIterator<Item = &'b D>,
{
    Evaluation::compute(predictions, gold).map(|evaluation| evaluation.accuracy())
}
