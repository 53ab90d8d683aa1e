use crate::classifier::{frequency::WordFrequency, Corpus, LabelId, WordId};
use crate::error::{BowError, Result};

/// Probability estimation
/// Every estimate reads the live counters; the only cached value is the
/// prior vector, which [`Corpus::posterior`] refreshes on each call.
impl Corpus {
    /// ラベルの事前確率を更新する
    /// `prior[l] = (label_doc_count[l] + 1) / (doc_count + label_count)`
    ///
    /// A label counted in more documents than exist means the counters are
    /// corrupted; that is reported as [`BowError::Inconsistency`] and the
    /// cache is left as it was.
    pub fn refresh_priors(&mut self) -> Result<()> {
        let label_count = self.label_count() as u64;
        let doc_count = self.stats.doc_count;
        let denominator = match doc_count.checked_add(label_count) {
            Some(denominator) => denominator,
            None => {
                let msg = format!(
                    "doc_count {} plus {} labels overflows the prior denominator",
                    doc_count, label_count
                );
                log::error!("{}", msg);
                return Err(BowError::Inconsistency(msg));
            }
        };

        let mut priors = Vec::with_capacity(self.label_count());
        for (label, &label_docs) in self.stats.label_doc_count.iter().enumerate() {
            if label_docs >= denominator {
                let msg = format!(
                    "label {} counted in {} documents, but doc_count is {} with {} labels",
                    label, label_docs, doc_count, label_count
                );
                log::error!("{}", msg);
                return Err(BowError::Inconsistency(msg));
            }
            priors.push((label_docs + 1) as f64 / denominator as f64);
        }
        self.label_prior = priors;
        Ok(())
    }

    /// ln P(word | label) with add-one smoothing over the current vocabulary:
    /// `ln((freq[label][word] + 1) / (total[label] + word_count))`.
    ///
    /// The denominator uses the vocabulary size at call time, so the value
    /// for a fixed (label, word) shrinks as new words are seen.
    #[inline]
    pub fn word_likelihood(&self, label: LabelId, word: WordId) -> f64 {
        let numerator = self.stats.label_word_freq(label, word).saturating_add(1) as f64;
        let denominator = self
            .stats
            .label_word_total(label)
            .saturating_add(self.word_count() as u64) as f64;
        (numerator / denominator).ln()
    }

    /// Unnormalised log score of every label:
    /// `ln(prior[l]) + Σ word_likelihood(l, w)` over the distinct words of
    /// the document. The in-document count of a word is not used as a weight.
    /// Uses the cached priors as they are.
    pub fn log_scores(&self, freq: &WordFrequency) -> Vec<f64> {
        (0..self.label_count())
            .map(|label| {
                freq.word_ids().fold(self.label_prior[label].ln(), |acc, word| {
                    acc + self.word_likelihood(label, word)
                })
            })
            .collect()
    }

    /// 文書を前提としたラベルの確率
    /// Posterior over labels for a document.
    ///
    /// Refreshes the priors, exponentiates the log scores directly and divides
    /// by their sum. Long documents or large vocabularies can underflow every
    /// score to 0, in which case the result is NaN; see
    /// [`Corpus::posterior_stable`] for a shifted variant.
    pub fn posterior(&mut self, freq: &WordFrequency) -> Result<Vec<f64>> {
        self.refresh_priors()?;
        let mut scores: Vec<f64> = self.log_scores(freq).into_iter().map(f64::exp).collect();
        let sum: f64 = scores.iter().sum();
        if sum == 0.0 || !sum.is_finite() {
            log::warn!(
                "posterior normaliser is {} for a document of {} distinct words",
                sum,
                freq.distinct()
            );
        }
        for score in scores.iter_mut() {
            *score /= sum;
        }
        Ok(scores)
    }

    /// Posterior computed with the max log score subtracted before
    /// exponentiation (log-sum-exp), which cannot underflow to all zeros.
    /// Agrees with [`Corpus::posterior`] whenever the latter is finite.
    pub fn posterior_stable(&mut self, freq: &WordFrequency) -> Result<Vec<f64>> {
        self.refresh_priors()?;
        let scores = self.log_scores(freq);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut shifted: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let sum: f64 = shifted.iter().sum();
        for score in shifted.iter_mut() {
            *score /= sum;
        }
        Ok(shifted)
    }
}

#[cfg(test)]
mod tests {
    use crate::classifier::{frequency::WordFrequency, Corpus};
    use crate::error::BowError;

    const EPS: f64 = 1e-12;

    fn corpus() -> Corpus {
        let mut corpus = Corpus::new("", ["spam", "ham", "eggs"]).unwrap();
        corpus.add_document(&["buy", "now", "buy"], &[0]).unwrap();
        corpus.add_document(&["hello", "friend"], &[1]).unwrap();
        corpus.add_document(&["hello", "buy"], &[0, 1]).unwrap();
        corpus
    }

    #[test]
    fn priors_follow_laplace_rule() {
        let mut corpus = corpus();
        corpus.refresh_priors().unwrap();
        let priors = corpus.label_priors();
        // doc_count 3, label_count 3; the two-label document pushes the sum past 1
        assert!((priors[0] - 3.0 / 6.0).abs() < EPS);
        assert!((priors[1] - 3.0 / 6.0).abs() < EPS);
        assert!((priors[2] - 1.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn priors_sum_to_one_for_single_label_documents() {
        let mut corpus = Corpus::new("", ["a", "b", "c"]).unwrap();
        for (i, word) in ["x", "y", "z", "w", "v"].iter().enumerate() {
            corpus.add_document(&[*word], &[i % 3]).unwrap();
        }
        corpus.refresh_priors().unwrap();
        let sum: f64 = corpus.label_priors().iter().sum();
        assert!((sum - 1.0).abs() < EPS);
    }

    #[test]
    fn word_likelihood_uses_current_vocabulary() {
        let mut corpus = corpus();
        let buy = corpus.word_id("buy").unwrap();
        // spam: buy=3, total=5, vocab=4
        let expected = (4.0_f64 / 9.0).ln();
        assert!((corpus.word_likelihood(0, buy) - expected).abs() < EPS);

        corpus.tally(&["fresh"]);
        let widened = (4.0_f64 / 10.0).ln();
        assert!((corpus.word_likelihood(0, buy) - widened).abs() < EPS);
        assert!(corpus.word_likelihood(0, buy) < expected);
    }

    #[test]
    fn unseen_words_have_positive_likelihood() {
        let mut corpus = corpus();
        let freq = corpus.tally(&["never", "seen"]);
        for label in 0..3 {
            for word in freq.word_ids() {
                let p = corpus.word_likelihood(label, word).exp();
                assert!(p > 0.0 && p < 1.0);
            }
        }
    }

    #[test]
    fn posterior_sums_to_one() {
        let mut corpus = corpus();
        for doc in [vec!["buy"], vec!["hello", "friend", "now"], vec![], vec!["zzz"]] {
            let freq = corpus.tally(&doc);
            let posterior = corpus.posterior(&freq).unwrap();
            let sum: f64 = posterior.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "sum {} for {:?}", sum, doc);
        }
    }

    #[test]
    fn repeated_words_contribute_once() {
        let mut corpus = corpus();
        let once = corpus.tally(&["buy", "hello"]);
        let many = corpus.tally(&["buy", "buy", "buy", "hello"]);
        let a = corpus.posterior(&once).unwrap();
        let b = corpus.posterior(&many).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < EPS);
        }
    }

    #[test]
    fn empty_document_posterior_equals_priors() {
        let mut corpus = corpus();
        let posterior = corpus.posterior(&WordFrequency::new()).unwrap();
        let priors = corpus.label_priors().to_vec();
        let sum: f64 = priors.iter().sum();
        for (p, prior) in posterior.iter().zip(&priors) {
            assert!((p - prior / sum).abs() < EPS);
        }
    }

    #[test]
    fn stable_matches_plain_when_finite() {
        let mut corpus = corpus();
        let freq = corpus.tally(&["buy", "now", "friend"]);
        let plain = corpus.posterior(&freq).unwrap();
        let stable = corpus.posterior_stable(&freq).unwrap();
        for (x, y) in plain.iter().zip(&stable) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn plain_posterior_underflows_on_long_documents() {
        let mut corpus = corpus();
        let words: Vec<String> = (0..2000).map(|i| format!("w{}", i)).collect();
        let freq = corpus.tally(&words);

        let plain = corpus.posterior(&freq).unwrap();
        assert!(plain.iter().all(|p| p.is_nan()));

        let stable = corpus.posterior_stable(&freq).unwrap();
        let sum: f64 = stable.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overflowing_prior_denominator_is_an_internal_error() {
        let mut corpus = corpus();
        corpus.stats.doc_count = u64::MAX;
        let err = corpus.refresh_priors().unwrap_err();
        assert!(err.is_internal());
        assert!(corpus.predict(&["buy"]).unwrap_err().is_internal());
    }

    #[test]
    fn word_likelihood_survives_huge_counts() {
        let mut corpus = corpus();
        let buy = corpus.word_id("buy").unwrap();
        corpus.stats.label_word_freq[2].insert(buy, u64::MAX);
        corpus.stats.label_word_total[2] = u64::MAX;
        let likelihood = corpus.word_likelihood(2, buy);
        assert!(likelihood.is_finite());
        assert!(likelihood <= 0.0);
    }

    #[test]
    fn corrupted_counts_are_an_internal_error() {
        let mut corpus = corpus();
        corpus.stats.label_doc_count[2] = 10;
        let err = corpus.refresh_priors().unwrap_err();
        assert!(err.is_internal());
        assert!(matches!(err, BowError::Inconsistency(_)));
        assert!(corpus.predict(&["buy"]).unwrap_err().is_internal());
    }
}
