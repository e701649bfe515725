use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{FieldPath, Section};

/// The five steps of the resume wizard, in navigation order.
///
/// PERSONAL → EDUCATION → EXPERIENCE → SKILLS → PROJECTS
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Personal,
    Education,
    Experience,
    Skills,
    Projects,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Personal,
        Stage::Education,
        Stage::Experience,
        Stage::Skills,
        Stage::Projects,
    ];

    /// The stage after this one, `None` at the terminal stage.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Personal => Some(Stage::Education),
            Stage::Education => Some(Stage::Experience),
            Stage::Experience => Some(Stage::Skills),
            Stage::Skills => Some(Stage::Projects),
            Stage::Projects => None,
        }
    }

    /// The stage before this one, `None` at the initial stage.
    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::Personal => None,
            Stage::Education => Some(Stage::Personal),
            Stage::Experience => Some(Stage::Education),
            Stage::Skills => Some(Stage::Experience),
            Stage::Projects => Some(Stage::Skills),
        }
    }

    /// The repeatable section edited on this stage.
    pub fn section(self) -> Option<Section> {
        match self {
            Stage::Personal => None,
            Stage::Education => Some(Section::Education),
            Stage::Experience => Some(Section::Experience),
            Stage::Skills => Some(Section::Skills),
            Stage::Projects => Some(Section::Projects),
        }
    }

    /// The stage on which the field at `path` is edited.
    pub fn owning(path: &FieldPath) -> Stage {
        match path.section() {
            None => Stage::Personal,
            Some(Section::Education) => Stage::Education,
            Some(Section::Experience) => Stage::Experience,
            Some(Section::Skills) => Stage::Skills,
            Some(Section::Projects) => Stage::Projects,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::Personal => "Personal Information",
            Stage::Education => "Education",
            Stage::Experience => "Work Experience",
            Stage::Skills => "Skills",
            Stage::Projects => "Projects",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Personal => write!(f, "PERSONAL"),
            Stage::Education => write!(f, "EDUCATION"),
            Stage::Experience => write!(f, "EXPERIENCE"),
            Stage::Skills => write!(f, "SKILLS"),
            Stage::Projects => write!(f, "PROJECTS"),
        }
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Stage::ALL
            .into_iter()
            .find(|stage| stage.to_string().to_lowercase() == lower)
            .ok_or_else(|| format!("unknown stage `{s}`"))
    }
}
