//! Canned copy templates.
//!
//! Nothing here inspects the profile beyond copying its strings into fixed
//! sentences; empty optional fields fall back to neutral wording.

use crate::profile::BusinessProfile;
use crate::service::GeneratedContent;
use funnelforge_model::{
    ButtonContent, ElementContent, FormContent, HeadingContent, Page, TextContent,
    VisualElement,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    /// Days after signup the email goes out.
    pub day: u32,
    pub subject: String,
    pub body: String,
}

/// Everything the simulated generator produces for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelBlueprint {
    pub name: String,
    pub headline: String,
    pub subheadline: String,
    pub content_blocks: Vec<ContentBlock>,
    pub landing_page_description: String,
    pub call_to_action: String,
    pub email_sequence: Vec<EmailDraft>,
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

/// Fills the canned templates with the profile's strings.
pub fn synthesize(profile: &BusinessProfile) -> FunnelBlueprint {
    let business = profile.business_name.trim();
    let industry = profile.industry.trim();
    let audience = profile.target_audience.trim();
    let goal = or_default(&profile.goal, "grow your business");
    let topic = or_default(&profile.topic, industry);

    FunnelBlueprint {
        name: format!("{business} Funnel"),
        headline: format!("{business}: The {industry} Partner {audience} Trust"),
        subheadline: format!("Discover how {business} helps {audience} {goal}."),
        content_blocks: vec![
            ContentBlock {
                title: "The Problem".into(),
                body: format!(
                    "Most {audience} struggle to find {topic} solutions that actually deliver."
                ),
            },
            ContentBlock {
                title: "The Solution".into(),
                body: format!(
                    "{business} brings proven {industry} expertise so you can {goal} faster."
                ),
            },
            ContentBlock {
                title: "Why Now".into(),
                body: format!("Join the {audience} who already rely on {business}."),
            },
        ],
        landing_page_description: format!(
            "A high-converting landing page for {business} aimed at {audience}, \
             built around a clear promise about {topic} and a single call to action."
        ),
        call_to_action: "Get Started Today".into(),
        email_sequence: vec![
            EmailDraft {
                day: 0,
                subject: format!("Welcome to {business}!"),
                body: format!(
                    "Thanks for joining us. Over the next few days we'll share how {audience} use {business} to {goal}."
                ),
            },
            EmailDraft {
                day: 2,
                subject: format!("The #1 {topic} mistake we see"),
                body: format!(
                    "Most {audience} make the same mistake with {topic}. Here's how to avoid it."
                ),
            },
            EmailDraft {
                day: 5,
                subject: format!("Ready to {goal}?"),
                body: format!("Your next step with {business} is one click away."),
            },
        ],
    }
}

impl FunnelBlueprint {
    /// Builds a draft landing page from the blueprint.
    pub fn to_page(&self) -> Page {
        let mut page =
            Page::new(self.name.clone(), "landing-page").with_description(self.landing_page_description.clone());
        page.settings.seo_title = self.headline.clone();
        page.settings.seo_description = self.subheadline.clone();

        let mut push = |content: ElementContent| {
            page.elements.add_element(VisualElement::with_content(content));
        };
        push(ElementContent::Heading(HeadingContent {
            text: self.headline.clone(),
            level: 1,
        }));
        push(ElementContent::Text(TextContent {
            text: self.subheadline.clone(),
        }));
        for block in &self.content_blocks {
            push(ElementContent::Heading(HeadingContent {
                text: block.title.clone(),
                level: 2,
            }));
            push(ElementContent::Text(TextContent {
                text: block.body.clone(),
            }));
        }
        push(ElementContent::Form(FormContent::default()));
        push(ElementContent::Button(ButtonContent {
            label: self.call_to_action.clone(),
            target: None,
        }));
        page
    }

    /// The blueprint in the JSON shape a generation backend answers with.
    pub fn to_generated_content(&self) -> GeneratedContent {
        GeneratedContent {
            content_blocks: self
                .content_blocks
                .iter()
                .map(|b| json!({"title": b.title, "body": b.body}))
                .collect(),
            landing_page: json!({
                "headline": self.headline,
                "subheadline": self.subheadline,
                "description": self.landing_page_description,
                "call_to_action": self.call_to_action,
            }),
            email_sequence: self
                .email_sequence
                .iter()
                .map(|e| json!({"day": e.day, "subject": e.subject, "body": e.body}))
                .collect(),
        }
    }
}
