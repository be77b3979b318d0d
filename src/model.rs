use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Seconds per question when neither the quiz file nor the command line sets one.
pub const DEFAULT_TIME_PER_QUESTION: u32 = 20;

/// Results location, resolved against the quiz URL once a submission is accepted.
pub const RESULT_PATH: &str = "/result";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub time_per_question: Option<u32>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Quiz")
    }
}

/// Question identifier as it appears in the answer map.
///
/// Quiz files may use integers or strings; both end up as the string key
/// the server reads back (`7` becomes `"7"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => QuestionId(n.to_string()),
            RawId::Text(s) => QuestionId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
    #[serde(default)]
    pub option_c: Option<String>,
    #[serde(default)]
    pub option_d: Option<String>,
}

impl Question {
    /// Options in presentation order. C and D are only offered when non-empty.
    pub fn options(&self) -> Vec<(OptionLetter, &str)> {
        let mut out = vec![
            (OptionLetter::A, self.option_a.as_str()),
            (OptionLetter::B, self.option_b.as_str()),
        ];
        if let Some(c) = self.option_c.as_deref().filter(|s| !s.is_empty()) {
            out.push((OptionLetter::C, c));
        }
        if let Some(d) = self.option_d.as_deref().filter(|s| !s.is_empty()) {
            out.push((OptionLetter::D, d));
        }
        out
    }

    pub fn offers(&self, letter: OptionLetter) -> bool {
        self.options().iter().any(|(l, _)| *l == letter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    /// Accepts `a`-`d` in either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLetter::A),
            'B' => Some(OptionLetter::B),
            'C' => Some(OptionLetter::C),
            'D' => Some(OptionLetter::D),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OptionLetter::A => 'A',
            OptionLetter::B => 'B',
            OptionLetter::C => 'C',
            OptionLetter::D => 'D',
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Selected option per question, sent wholesale on submit.
pub type AnswerSet = BTreeMap<QuestionId, OptionLetter>;

/// A missing or zero limit falls back to the default.
pub fn effective_time_limit(configured: Option<u32>) -> u32 {
    match configured {
        Some(secs) if secs > 0 => secs,
        _ => DEFAULT_TIME_PER_QUESTION,
    }
}
