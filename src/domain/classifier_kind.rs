use std::fmt;

use super::band::WRITING_BANDS;
use super::cefr_level::CefrLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifierKind {
    Writing,
    Speaking,
}

impl ClassifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierKind::Writing => "writing",
            ClassifierKind::Speaking => "speaking",
        }
    }

    pub fn num_classes(&self) -> usize {
        match self {
            ClassifierKind::Writing => WRITING_BANDS.len(),
            ClassifierKind::Speaking => CefrLevel::ALL.len(),
        }
    }

    /// Minimum input length in characters, counted after trimming.
    pub fn min_text_chars(&self) -> usize {
        match self {
            ClassifierKind::Writing => 50,
            ClassifierKind::Speaking => 10,
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
