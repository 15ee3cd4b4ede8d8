//! Workspace umbrella crate for the code-logic integrity engine.
//!
//! Stitches the three stages together behind one API:
//!
//! ```text
//! raw code ─▶ normalize ─▶ logic (tokens, fingerprint) ─▶ integrity (verdict)
//! ```
//!
//! Most callers build a [`Pipeline`] once (optionally from a
//! [`LogicfpConfig`] YAML file) and call [`Pipeline::process_submission`]
//! per submission.
//!
//! ```
//! use logicfp::{process_submission, IntegrityRequest, Language, SubmissionRecord};
//!
//! let request = IntegrityRequest::new("while (n > 0) { n = n - 1; }", Language::C)
//!     .with_prior(SubmissionRecord {
//!         id: "alice".into(),
//!         code: "while (k > 0) {\n  k = k - 1;  // count down\n}".into(),
//!         language: Language::C,
//!         tokens: None,
//!     });
//!
//! let verdict = process_submission(&request);
//! assert_eq!(verdict.similarity_score, 100);
//! assert!(verdict.flagged);
//! assert_eq!(verdict.matching_submission_id.as_deref(), Some("alice"));
//! ```

pub mod config;

pub use config::{ConfigLoadError, IntegrityYamlConfig, LogicfpConfig, TokenizerYamlConfig};
pub use integrity::{
    check_integrity, set_integrity_metrics, similarity, subtract, CandidateScore,
    IntegrityConfig, IntegrityEngine, IntegrityError, IntegrityMetrics, IntegrityReport,
    IntegrityRequest, IntegrityVerdict, PriorSource, PriorSubmission, SubmissionRecord,
    TokenCounts,
};
pub use logic::{
    fingerprint, parse_fingerprint, tokenize, tokenize_source, Fingerprint, FingerprintError,
    LogicToken, Rule, RuleTable, TokenOrder, TokenSequence, Tokenizer, TokenizerConfig,
    TokenizerError, LOGIC_VOCABULARY_VERSION,
};
pub use normalize::{
    collapse_lines, hash_normalized, normalize, Language, NormalizedText, NORMALIZER_VERSION,
};

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while building a pipeline or reading its input.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("config: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("tokenizer: {0}")]
    Tokenizer(#[from] TokenizerError),

    #[error("integrity: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("invalid request: {0}")]
    Request(#[from] serde_json::Error),
}

/// Everything derived from one piece of source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFingerprint {
    pub language: Language,
    /// SHA-256 of the normalized text, versioned.
    pub normalized_sha256: String,
    pub tokens: TokenSequence,
    pub fingerprint: Fingerprint,
    /// xxh3 digest of `fingerprint`.
    pub digest: u64,
}

/// Configured normalize → tokenize → score pipeline.
///
/// Immutable once built; share it behind an `Arc` across threads.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    engine: IntegrityEngine,
}

impl Pipeline {
    pub fn new(
        tokenizer_cfg: TokenizerConfig,
        integrity_cfg: IntegrityConfig,
    ) -> Result<Self, PipelineError> {
        let tokenizer = Tokenizer::new(tokenizer_cfg)?;
        let engine = IntegrityEngine::new(tokenizer, integrity_cfg)?;
        Ok(Self { engine })
    }

    pub fn from_config(cfg: &LogicfpConfig) -> Result<Self, PipelineError> {
        cfg.validate()?;
        debug!(
            version = cfg.version.as_str(),
            order = ?cfg.tokenizer.order,
            max_lines = ?cfg.tokenizer.max_lines,
            flag_threshold = cfg.integrity.flag_threshold,
            explain = cfg.integrity.explain,
            "pipeline_config_loaded"
        );
        Self::new(cfg.tokenizer_config(), cfg.integrity_config())
    }

    /// Load a YAML config file and build the pipeline from it.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let cfg = LogicfpConfig::from_file(path)?;
        Self::from_config(&cfg)
    }

    pub fn engine(&self) -> &IntegrityEngine {
        &self.engine
    }

    pub fn process_submission(&self, request: &IntegrityRequest) -> IntegrityVerdict {
        self.engine.check_request(request)
    }

    /// Verdict plus per-prior scores when the config enables `explain`.
    pub fn process_submission_report(&self, request: &IntegrityRequest) -> IntegrityReport {
        self.engine.report_request(request)
    }

    pub fn process_batch(&self, requests: &[IntegrityRequest]) -> Vec<IntegrityVerdict> {
        self.engine.check_batch(requests)
    }

    /// Parse a JSON [`IntegrityRequest`] and check it.
    pub fn process_json(&self, json: &str) -> Result<IntegrityVerdict, PipelineError> {
        let request: IntegrityRequest = serde_json::from_str(json).map_err(|err| {
            warn!(error = %err, line = err.line(), column = err.column(), "request_rejected");
            err
        })?;
        Ok(self.process_submission(&request))
    }

    pub fn fingerprint_source(&self, code: &str, language: Language) -> SourceFingerprint {
        let text = normalize(code, language);
        let tokens = self.engine.tokenizer().tokenize(&text);
        let fp = fingerprint(&tokens);
        SourceFingerprint {
            language,
            normalized_sha256: text.sha256_hex(),
            digest: fp.digest(),
            fingerprint: fp,
            tokens,
        }
    }
}

/// Check one request with the default pipeline.
pub fn process_submission(request: &IntegrityRequest) -> IntegrityVerdict {
    Pipeline::default().process_submission(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pipeline_matches_free_function() {
        let request = IntegrityRequest::new("for i in range(3):\n    print(i)", Language::Python)
            .with_prior(SubmissionRecord {
                id: "p1".into(),
                code: String::new(),
                language: Language::Python,
                tokens: Some(vec![LogicToken::For, LogicToken::Print].into()),
            });
        assert_eq!(
            Pipeline::default().process_submission(&request),
            process_submission(&request)
        );
        assert_eq!(process_submission(&request).similarity_score, 100);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = LogicfpConfig::default();
        cfg.integrity.flag_threshold = 0;
        assert!(matches!(
            Pipeline::from_config(&cfg),
            Err(PipelineError::Config(ConfigLoadError::Validation(_)))
        ));

        let err = Pipeline::new(
            TokenizerConfig::default(),
            IntegrityConfig::new().with_flag_threshold(120),
        );
        assert!(matches!(err, Err(PipelineError::Integrity(_))));
    }

    #[test]
    fn process_json_reads_wire_format() {
        let verdict = Pipeline::default()
            .process_json(
                r#"{"code": "if (a < b) return a;", "language": "c",
                    "priorSubmissions": [{"id": "x", "tokens": ["IF", "COMPARE", "RETURN"]}]}"#,
            )
            .unwrap();
        assert_eq!(verdict.similarity_score, 100);
        assert_eq!(verdict.logic_hash.as_str(), "IF|COMPARE|RETURN");

        assert!(matches!(
            Pipeline::default().process_json("{not json"),
            Err(PipelineError::Request(_))
        ));
    }

    #[test]
    fn process_json_treats_null_fields_as_empty() {
        let verdict = Pipeline::default()
            .process_json(
                r#"{"code": null, "language": null,
                    "priorSubmissions": [{"id": "x", "code": null, "language": null}]}"#,
            )
            .unwrap();
        assert_eq!(verdict.similarity_score, 0);
        assert!(!verdict.flagged);
        assert!(verdict.logic_hash.is_empty());
        assert_eq!(verdict.matching_submission_id, None);

        let verdict = Pipeline::default()
            .process_json(
                r#"{"code": "print(x)", "language": null,
                    "priorSubmissions": [{"id": "x", "code": "print(y)", "language": null}]}"#,
            )
            .unwrap();
        assert_eq!(verdict.similarity_score, 100);
        assert_eq!(verdict.matching_submission_id.as_deref(), Some("x"));
    }

    #[test]
    fn fingerprint_source_is_consistent() {
        let pipeline = Pipeline::default();
        let fp = pipeline.fingerprint_source("x = 1  # one\nprint(x)", Language::Python);
        assert_eq!(fp.tokens.as_slice(), &[LogicToken::Assign, LogicToken::Print]);
        assert_eq!(fp.fingerprint.as_str(), "ASSIGN|PRINT");
        assert_eq!(fp.digest, fp.fingerprint.digest());
        assert_eq!(
            fp.normalized_sha256,
            normalize("x = 1\nprint(x)", Language::Python).sha256_hex()
        );
    }
}
