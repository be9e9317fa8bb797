use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The voice choice exposed to users. Backends map it to a concrete voice id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceSelector {
    #[default]
    Male,
    Female,
}

impl VoiceSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceSelector::Male => "Male",
            VoiceSelector::Female => "Female",
        }
    }
}

impl FromStr for VoiceSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(VoiceSelector::Male),
            "female" => Ok(VoiceSelector::Female),
            other => Err(format!(
                "Unsupported voice '{}'. Expected Male or Female.",
                other
            )),
        }
    }
}

impl std::fmt::Display for VoiceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A concrete voice offered by a synthesis backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceInfo {
    pub id: &'static str,
    /// `None` for voices the provider does not classify
    pub gender: Option<VoiceSelector>,
}

impl VoiceInfo {
    pub const fn new(id: &'static str, gender: Option<VoiceSelector>) -> Self {
        Self { id, gender }
    }
}

/// Per-gender voice ids configured by the operator
#[derive(Debug, Clone, Default)]
pub struct VoicePreferences {
    pub male: Option<String>,
    pub female: Option<String>,
}

impl VoicePreferences {
    pub fn for_selector(&self, selector: VoiceSelector) -> Option<&str> {
        match selector {
            VoiceSelector::Male => self.male.as_deref(),
            VoiceSelector::Female => self.female.as_deref(),
        }
    }
}

/// Pick the backend voice for a selector.
///
/// Order: the configured voice if the catalog has it, then the first voice of
/// the requested gender, then the first voice of any gender. Only an empty
/// catalog yields `None`.
pub fn resolve_voice<'a>(
    catalog: &'a [VoiceInfo],
    selector: VoiceSelector,
    preferred: Option<&str>,
) -> Option<&'a VoiceInfo> {
    if let Some(preferred) = preferred {
        if let Some(voice) = catalog
            .iter()
            .find(|v| v.id.eq_ignore_ascii_case(preferred))
        {
            return Some(voice);
        }
        tracing::warn!(
            preferred_voice = preferred,
            selector = %selector,
            "Configured voice not offered by backend, using catalog default"
        );
    }

    catalog
        .iter()
        .find(|v| v.gender == Some(selector))
        .or_else(|| catalog.first())
}
