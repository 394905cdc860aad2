//! Interview setup: role, seniority and focus area
//!
//! The role determines which focus areas are allowed. The lookup table is
//! fixed; a setup can only be built from a focus area listed for its role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error("Unknown seniority: {0}")]
    UnknownSeniority(String),
    #[error("Focus area must not be empty")]
    EmptyFocusArea,
    #[error("Focus area '{focus_area}' is not offered for the {role} role")]
    FocusAreaNotAllowed { role: Role, focus_area: String },
}

/// Role the candidate is interviewing for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Frontend,
    Backend,
    Fullstack,
    #[serde(rename = "Data Engineer")]
    DataEngineer,
    #[serde(rename = "AI/ML Engineer")]
    AiMlEngineer,
    DevOps,
    Mobile,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Frontend,
        Role::Backend,
        Role::Fullstack,
        Role::DataEngineer,
        Role::AiMlEngineer,
        Role::DevOps,
        Role::Mobile,
    ];

    /// Wire and display name
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Frontend => "Frontend",
            Role::Backend => "Backend",
            Role::Fullstack => "Fullstack",
            Role::DataEngineer => "Data Engineer",
            Role::AiMlEngineer => "AI/ML Engineer",
            Role::DevOps => "DevOps",
            Role::Mobile => "Mobile",
        }
    }

    /// Focus areas offered for this role
    pub fn focus_areas(self) -> &'static [&'static str] {
        match self {
            Role::Frontend => &[
                "React/Next.js",
                "UI/UX Design",
                "Performance Optimization",
                "State Management",
            ],
            Role::Backend => &["APIs", "Database Design", "Microservices", "System Design"],
            Role::Fullstack => &[
                "Full System Design",
                "API Integration",
                "DevOps",
                "Architecture",
            ],
            Role::DataEngineer => &["Data Pipelines", "ETL", "Data Warehousing", "Big Data"],
            Role::AiMlEngineer => &[
                "ML Modeling",
                "Model Deployment",
                "Data Processing",
                "MLOps",
            ],
            Role::DevOps => &[
                "CI/CD",
                "Cloud Infrastructure",
                "Containerization",
                "Monitoring",
            ],
            Role::Mobile => &[
                "Cross-platform",
                "Native Development",
                "App Architecture",
                "Performance",
            ],
        }
    }

    pub fn allows_focus_area(self, focus_area: &str) -> bool {
        self.focus_areas().contains(&focus_area)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SetupError::UnknownRole(s.to_string()))
    }
}

/// Seniority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl Seniority {
    pub const ALL: [Seniority; 4] = [
        Seniority::Junior,
        Seniority::Mid,
        Seniority::Senior,
        Seniority::Lead,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Seniority::Junior => "Junior",
            Seniority::Mid => "Mid",
            Seniority::Senior => "Senior",
            Seniority::Lead => "Lead",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Seniority {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Seniority::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SetupError::UnknownSeniority(s.to_string()))
    }
}

/// Parameters the question set is generated from. Immutable once a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSetup {
    pub role: Role,
    pub seniority: Seniority,
    pub focus_area: String,
}

impl InterviewSetup {
    /// Build a setup, checking the focus area against the role's table.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the focus area is empty or not offered for `role`.
    pub fn new(
        role: Role,
        seniority: Seniority,
        focus_area: impl Into<String>,
    ) -> Result<Self, SetupError> {
        let setup = Self {
            role,
            seniority,
            focus_area: focus_area.into().trim().to_string(),
        };
        setup.validate()?;
        Ok(setup)
    }

    /// Parse all three fields from free text, as typed by a user.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` for an unknown role or seniority, or a focus area
    /// outside the role's table.
    pub fn parse(role: &str, seniority: &str, focus_area: &str) -> Result<Self, SetupError> {
        let role: Role = role.parse()?;
        let seniority: Seniority = seniority.parse()?;
        let focus_area = role
            .focus_areas()
            .iter()
            .find(|area| area.eq_ignore_ascii_case(focus_area.trim()))
            .map_or_else(|| focus_area.trim().to_string(), |area| (*area).to_string());
        Self::new(role, seniority, focus_area)
    }

    /// Check the role -> focus area invariant. Used on deserialized snapshots.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` when the invariant does not hold.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.focus_area.trim().is_empty() {
            return Err(SetupError::EmptyFocusArea);
        }
        if !self.role.allows_focus_area(&self.focus_area) {
            return Err(SetupError::FocusAreaNotAllowed {
                role: self.role,
                focus_area: self.focus_area.clone(),
            });
        }
        Ok(())
    }
}
