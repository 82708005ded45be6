use crate::error::{GenerationError, GenerationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user tells the wizard about their business.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    pub business_name: String,
    pub industry: String,
    pub target_audience: String,
    pub goal: String,
    pub topic: String,
    pub tone: String,
}

/// Fields that must be filled in before generation can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    BusinessName,
    Industry,
    TargetAudience,
}

impl RequiredField {
    pub const fn label(&self) -> &'static str {
        match self {
            RequiredField::BusinessName => "business name",
            RequiredField::Industry => "industry",
            RequiredField::TargetAudience => "target audience",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl BusinessProfile {
    /// Rejects the profile when business name, industry or target audience
    /// is empty or only whitespace. Missing fields are reported in form order.
    pub fn validate(&self) -> GenerationResult<()> {
        let missing: Vec<RequiredField> = [
            (RequiredField::BusinessName, &self.business_name),
            (RequiredField::Industry, &self.industry),
            (RequiredField::TargetAudience, &self.target_audience),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GenerationError::Validation { missing })
        }
    }
}
