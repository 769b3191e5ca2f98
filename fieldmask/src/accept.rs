use std::sync::LazyLock;

use regex::Regex;

/// Acceptance pattern used when a field does not configure one.
pub const DEFAULT_ACCEPT: &str = r"[\d\w]";

/// Alphabet probed against an acceptance rule to decide whether the field is
/// numeric. Exactly ten matches means "digits only".
pub const NUMERIC_PROBE: &str =
    "abcdefghijklmnopqrstuvwxyz ABCDEFGHIJKLMNOPQRSTUVWXYZ 1234567890 !@#$%^&*()_+-=[];',./{}|:\"<>?";

static DEFAULT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_ACCEPT).expect("default accept pattern is valid"));

/// Which characters may ever occupy a field.
///
/// A rule is either explicit (configured by the caller) or the engine default.
/// Only explicit rules drive key interception on unmasked fields and the
/// unaccepted-character check.
#[derive(Debug, Clone)]
pub struct AcceptRule {
    regex: Regex,
    explicit: bool,
}

impl AcceptRule {
    /// Compile an explicit acceptance rule.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            explicit: true,
        })
    }

    /// The default `[\d\w]` rule.
    pub fn fallback() -> Self {
        Self {
            regex: DEFAULT_REGEX.clone(),
            explicit: false,
        }
    }

    /// Whether the rule was configured rather than defaulted.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// All non-empty accepted tokens of `input`, in order.
    pub fn extract<'a>(&self, input: &'a str) -> Vec<&'a str> {
        self.regex
            .find_iter(input)
            .map(|m| m.as_str())
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Test a single character.
    pub fn accepts_char(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.regex.is_match(c.encode_utf8(&mut buf))
    }

    /// True if any part of `text` is matched by the rule.
    pub fn matches_any(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Numeric inference: an explicit rule matching exactly the ten digits of
    /// [`NUMERIC_PROBE`].
    pub fn is_numeric(&self) -> bool {
        self.explicit && self.regex.find_iter(NUMERIC_PROBE).count() == 10
    }
}

impl Default for AcceptRule {
    fn default() -> Self {
        Self::fallback()
    }
}

impl PartialEq for AcceptRule {
    fn eq(&self, other: &Self) -> bool {
        self.explicit == other.explicit && self.as_str() == other.as_str()
    }
}

impl Eq for AcceptRule {}
