use std::fmt;
use std::str::FromStr;

/// CEFR proficiency level, in speaking model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }

    /// Approximate IELTS speaking band for this level.
    pub fn approximate_band(&self) -> f32 {
        match self {
            CefrLevel::A1 => 2.5,
            CefrLevel::A2 => 3.5,
            CefrLevel::B1 => 5.0,
            CefrLevel::B2 => 6.5,
            CefrLevel::C1 => 7.5,
            CefrLevel::C2 => 8.5,
        }
    }
}

impl FromStr for CefrLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            other => Err(format!("Invalid CEFR level: {}", other)),
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CefrPrediction {
    pub level: CefrLevel,
    pub approximate_band: f32,
}

impl CefrPrediction {
    pub fn new(level: CefrLevel) -> Self {
        Self {
            level,
            approximate_band: level.approximate_band(),
        }
    }
}
