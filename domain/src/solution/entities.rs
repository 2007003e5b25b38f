//! Solution entities

use serde::{Deserialize, Serialize};

/// Path of the inquiry page that `contact` actions lead to
pub const INQUIRY_PATH: &str = "/inquiry";

/// What a call-to-action does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaAction {
    /// Open the inquiry form
    #[default]
    Contact,
    /// Open a partner site
    External,
    /// Navigate within the product
    Internal,
}

/// Call to action attached to a solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cta {
    pub label: String,
    #[serde(default)]
    pub action: CtaAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Cta {
    pub fn contact(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: CtaAction::Contact,
            href: None,
        }
    }

    pub fn external(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: CtaAction::External,
            href: Some(href.into()),
        }
    }

    /// Where activating the CTA leads, if anywhere
    pub fn destination(&self) -> Option<&str> {
        match self.action {
            CtaAction::Contact => Some(INQUIRY_PATH),
            CtaAction::External | CtaAction::Internal => self.href.as_deref(),
        }
    }
}

/// Partner offering a solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A recommendable follow-up offer (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    /// Lower values are recommended first
    pub priority: u32,
    pub cta: Cta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<Partner>,
}

impl Solution {
    pub fn new(id: impl Into<String>, title: impl Into<String>, priority: u32) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            description: String::new(),
            icon: String::new(),
            cta: Cta::contact(title.clone()),
            title,
            priority,
            partner: None,
        }
    }

    pub fn with_cta(mut self, cta: Cta) -> Self {
        self.cta = cta;
        self
    }

    pub fn with_partner(mut self, partner: Partner) -> Self {
        self.partner = Some(partner);
        self
    }
}
