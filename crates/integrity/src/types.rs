use logic::{Fingerprint, TokenSequence, TokenizerError};
use normalize::Language;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Read a missing or `null` field as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Where a prior submission's tokens come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorSource {
    /// Tokens computed earlier (e.g. decoded from a stored fingerprint).
    Tokenized(TokenSequence),
    /// Raw code, normalized and tokenized by the engine on demand.
    RawCode { code: String, language: Language },
}

/// A previously submitted solution to compare against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorSubmission {
    pub id: String,
    pub source: PriorSource,
}

impl PriorSubmission {
    pub fn tokenized(id: impl Into<String>, tokens: impl Into<TokenSequence>) -> Self {
        Self {
            id: id.into(),
            source: PriorSource::Tokenized(tokens.into()),
        }
    }

    pub fn raw(id: impl Into<String>, code: impl Into<String>, language: Language) -> Self {
        Self {
            id: id.into(),
            source: PriorSource::RawCode {
                code: code.into(),
                language,
            },
        }
    }
}

/// Prior submission as it arrives from a caller or a store.
///
/// `tokens` may be absent, in which case `code` is tokenized on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenSequence>,
}

impl SubmissionRecord {
    /// Precomputed tokens win; otherwise the raw code is used.
    pub fn into_prior(self) -> PriorSubmission {
        let source = match self.tokens {
            Some(tokens) => PriorSource::Tokenized(tokens),
            None => PriorSource::RawCode {
                code: self.code,
                language: self.language,
            },
        };
        PriorSubmission {
            id: self.id,
            source,
        }
    }
}

impl From<SubmissionRecord> for PriorSubmission {
    fn from(record: SubmissionRecord) -> Self {
        record.into_prior()
    }
}

impl From<&SubmissionRecord> for PriorSubmission {
    fn from(record: &SubmissionRecord) -> Self {
        record.clone().into_prior()
    }
}

/// Full integrity check input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prior_submissions: Vec<SubmissionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_code: Option<String>,
}

impl IntegrityRequest {
    pub fn new(code: impl Into<String>, language: Language) -> Self {
        Self {
            code: code.into(),
            language,
            ..Default::default()
        }
    }

    pub fn with_prior(mut self, record: SubmissionRecord) -> Self {
        self.prior_submissions.push(record);
        self
    }

    pub fn with_template(mut self, template_code: impl Into<String>) -> Self {
        self.template_code = Some(template_code.into());
        self
    }
}

/// Outcome of an integrity check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityVerdict {
    /// Best similarity against any prior, 0..=100.
    pub similarity_score: u8,
    /// `similarity_score >= flag_threshold`.
    pub flagged: bool,
    /// Fingerprint of the candidate's full token sequence (template included).
    pub logic_hash: Fingerprint,
    /// Id of the first prior reaching the best score; `None` if that score is 0.
    pub matching_submission_id: Option<String>,
}

impl IntegrityVerdict {
    /// Round and clamp `score`, then derive `flagged` from `threshold`.
    pub fn new(
        score: f64,
        threshold: u8,
        logic_hash: Fingerprint,
        matching_submission_id: Option<String>,
    ) -> Self {
        let similarity_score = if score.is_nan() {
            0
        } else {
            score.round().clamp(0.0, 100.0) as u8
        };
        Self {
            similarity_score,
            flagged: similarity_score >= threshold,
            logic_hash,
            matching_submission_id,
        }
    }
}

/// Unrounded score against one prior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateScore {
    pub id: String,
    pub score: f64,
}

/// Verdict plus every per-prior score, in input order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegrityReport {
    pub verdict: IntegrityVerdict,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<CandidateScore>,
}

/// Similarity engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntegrityConfig {
    /// Configuration schema version. Must be >= 1.
    pub version: u32,
    /// Rounded score at or above which a submission is flagged.
    #[serde(default = "IntegrityConfig::default_flag_threshold")]
    pub flag_threshold: u8,
    /// Populate per-prior scores in [`IntegrityReport`]s built from requests.
    #[serde(default)]
    pub explain: bool,
    /// Evaluate batch requests on the rayon pool.
    #[serde(default = "IntegrityConfig::default_use_parallel")]
    pub use_parallel: bool,
}

impl IntegrityConfig {
    pub const DEFAULT_FLAG_THRESHOLD: u8 = 70;

    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn default_flag_threshold() -> u8 {
        Self::DEFAULT_FLAG_THRESHOLD
    }

    pub(crate) fn default_use_parallel() -> bool {
        true
    }

    pub fn with_flag_threshold(mut self, threshold: u8) -> Self {
        self.flag_threshold = threshold;
        self
    }

    pub fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn validate(&self) -> Result<(), IntegrityError> {
        if self.version == 0 {
            return Err(IntegrityError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if !(1..=100).contains(&self.flag_threshold) {
            return Err(IntegrityError::InvalidThreshold {
                threshold: self.flag_threshold,
            });
        }
        Ok(())
    }
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            version: 1,
            flag_threshold: Self::DEFAULT_FLAG_THRESHOLD,
            explain: false,
            use_parallel: Self::default_use_parallel(),
        }
    }
}

/// Errors from building an [`crate::IntegrityEngine`]. Checks themselves never fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntegrityError {
    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid flag threshold {threshold}; expected 1..=100")]
    InvalidThreshold { threshold: u8 },

    #[error("tokenizer config: {0}")]
    Tokenizer(#[from] TokenizerError),
}
