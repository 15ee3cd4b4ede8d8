use std::borrow::Cow;
use std::time::Instant;

use logic::{fingerprint, LogicToken, TokenSequence, Tokenizer};
use normalize::{normalize, Language};
use rayon::prelude::*;
use tracing::{debug, info, Level};

use crate::counts::TokenCounts;
use crate::metrics::metrics_recorder;
use crate::similarity::{similarity_counts, subtract_budget};
use crate::types::{
    CandidateScore, IntegrityConfig, IntegrityError, IntegrityReport, IntegrityRequest,
    IntegrityVerdict, PriorSource, PriorSubmission,
};


/// Scores a candidate against prior submissions.
///
/// Holds a [`Tokenizer`] for resolving raw-code priors and request inputs.
/// The engine is immutable and `Send + Sync`; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct IntegrityEngine {
    tokenizer: Tokenizer,
    cfg: IntegrityConfig,
}

impl IntegrityEngine {
    pub fn new(tokenizer: Tokenizer, cfg: IntegrityConfig) -> Result<Self, IntegrityError> {
        cfg.validate()?;
        Ok(Self { tokenizer, cfg })
    }

    /// Engine with the default tokenizer and the given config.
    pub fn with_config(cfg: IntegrityConfig) -> Result<Self, IntegrityError> {
        Self::new(Tokenizer::default(), cfg)
    }

    pub fn config(&self) -> &IntegrityConfig {
        &self.cfg
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Normalize and tokenize raw code with this engine's tokenizer.
    pub fn tokens_for(&self, code: &str, language: Language) -> TokenSequence {
        self.tokenizer.tokenize(&normalize(code, language))
    }

    /// Best match of `candidate` among `priors` after removing `template`.
    pub fn check(
        &self,
        candidate: &[LogicToken],
        priors: &[PriorSubmission],
        template: &[LogicToken],
    ) -> IntegrityVerdict {
        self.evaluate(candidate, priors, template, false).verdict
    }

    /// Like [`IntegrityEngine::check`], also returning every per-prior score.
    pub fn check_explained(
        &self,
        candidate: &[LogicToken],
        priors: &[PriorSubmission],
        template: &[LogicToken],
    ) -> IntegrityReport {
        self.evaluate(candidate, priors, template, true)
    }

    /// Tokenize the request's candidate and template, resolve its priors and check.
    pub fn check_request(&self, request: &IntegrityRequest) -> IntegrityVerdict {
        self.request_report(request, false).verdict
    }

    /// [`IntegrityEngine::check_request`] returning a report.
    ///
    /// Per-prior scores are filled in when the config enables `explain`.
    pub fn report_request(&self, request: &IntegrityRequest) -> IntegrityReport {
        self.request_report(request, self.cfg.explain)
    }

    /// Check many requests. Output order matches input order.
    pub fn check_batch(&self, requests: &[IntegrityRequest]) -> Vec<IntegrityVerdict> {
        if self.cfg.use_parallel {
            requests.par_iter().map(|r| self.check_request(r)).collect()
        } else {
            requests.iter().map(|r| self.check_request(r)).collect()
        }
    }

    fn request_report(&self, request: &IntegrityRequest, explain: bool) -> IntegrityReport {
        let candidate = self.tokens_for(&request.code, request.language);
        let template = request
            .template_code
            .as_deref()
            .map(|code| self.tokens_for(code, request.language))
            .unwrap_or_default();
        let priors: Vec<PriorSubmission> = request
            .prior_submissions
            .iter()
            .map(PriorSubmission::from)
            .collect();
        self.evaluate(&candidate, &priors, &template, explain)
    }

    fn resolve<'a>(&self, prior: &'a PriorSubmission) -> Cow<'a, [LogicToken]> {
        match &prior.source {
            PriorSource::Tokenized(tokens) => Cow::Borrowed(tokens.as_slice()),
            PriorSource::RawCode { code, language } => {
                Cow::Owned(self.tokens_for(code, *language).into_vec())
            }
        }
    }

    fn evaluate(
        &self,
        candidate: &[LogicToken],
        priors: &[PriorSubmission],
        template: &[LogicToken],
        explain: bool,
    ) -> IntegrityReport {
        let span = tracing::span!(
            Level::DEBUG,
            "integrity.check",
            candidate_tokens = candidate.len(),
            priors = priors.len(),
            template_tokens = template.len()
        );
        let _guard = span.enter();
        let start = Instant::now();

        let logic_hash = fingerprint(candidate);
        let budget = TokenCounts::from_tokens(template);
        let unique = TokenCounts::from_tokens(&subtract_budget(candidate, budget));

        let mut scores = Vec::with_capacity(if explain { priors.len() } else { 0 });
        let mut best = 0.0_f64;
        let mut best_id: Option<&str> = None;

        if unique.is_empty() {
            // Nothing of the candidate's own survives the template.
            debug!(
                candidate_tokens = candidate.len(),
                "integrity_candidate_all_template"
            );
            if explain {
                scores.extend(priors.iter().map(|p| CandidateScore {
                    id: p.id.clone(),
                    score: 0.0,
                }));
            }
        } else {
            for prior in priors {
                let prior_tokens = self.resolve(prior);
                let prior_unique = TokenCounts::from_tokens(&subtract_budget(&prior_tokens, budget));
                let score = similarity_counts(&unique, &prior_unique);
                if explain {
                    scores.push(CandidateScore {
                        id: prior.id.clone(),
                        score,
                    });
                }
                if score > best {
                    best = score;
                    best_id = Some(prior.id.as_str());
                }
            }
        }

        let verdict = IntegrityVerdict::new(
            best,
            self.cfg.flag_threshold,
            logic_hash,
            best_id.map(str::to_owned),
        );

        let elapsed = start.elapsed();
        let elapsed_micros = elapsed.as_micros() as u64;
        if verdict.flagged {
            info!(
                score = verdict.similarity_score,
                matching_submission_id = verdict.matching_submission_id.as_deref().unwrap_or(""),
                compared = priors.len(),
                elapsed_micros,
                "integrity_flagged"
            );
        }
        debug!(
            score = verdict.similarity_score,
            flagged = verdict.flagged,
            compared = priors.len(),
            elapsed_micros,
            "integrity_check_complete"
        );

        if let Some(recorder) = metrics_recorder() {
            recorder.record_check(
                elapsed,
                priors.len(),
                verdict.similarity_score,
                verdict.flagged,
            );
        }

        IntegrityReport { verdict, scores }
    }
}

/// [`IntegrityEngine::check`] with the default engine.
pub fn check_integrity(
    candidate: &[LogicToken],
    priors: &[PriorSubmission],
    template: &[LogicToken],
) -> IntegrityVerdict {
    IntegrityEngine::default().check(candidate, priors, template)
}
