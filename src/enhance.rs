//! Content enhancement for the preview's "Enhance" action.
//!
//! The shipped [`ScriptedEnhancer`] does not talk to any model: after a fixed
//! delay it swaps in canned copy for the summary and the first job.

use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

use crate::document::ResumeDocument;

pub const ENHANCED_SUMMARY: &str = "Results-driven software engineer with over 3 years of experience in developing scalable web applications. Proficient in React, TypeScript, and Node.js with a track record of delivering high-quality code on time. Passionate about creating intuitive user experiences and optimizing application performance.";

pub const ENHANCED_EXPERIENCE: &str = "• Led the development of a customer-facing portal, increasing user engagement by 45%\n\
• Optimized database queries, reducing load times by 30% and improving overall application performance\n\
• Collaborated with UX designers to implement responsive designs, ensuring seamless user experience across all devices\n\
• Mentored 3 junior developers, improving team productivity and code quality";

/// Rewrites resume copy. Never fails; at worst it returns its input.
#[allow(async_fn_in_trait)]
pub trait Enhancer {
    async fn enhance(&self, document: ResumeDocument) -> ResumeDocument;
}

#[derive(Debug, Clone)]
pub struct ScriptedEnhancer {
    delay: Duration,
}

impl Default for ScriptedEnhancer {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

impl ScriptedEnhancer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Enhancer for ScriptedEnhancer {
    async fn enhance(&self, mut document: ResumeDocument) -> ResumeDocument {
        sleep(self.delay).await;

        if !document.summary.is_empty() {
            document.summary = ENHANCED_SUMMARY.to_string();
        }
        if let Some(first) = document.experience.first_mut() {
            first.description = ENHANCED_EXPERIENCE.to_string();
        }

        info!(delay_ms = self.delay.as_millis() as u64, "resume enhanced");
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EntryList, ExperienceEntry};

    fn document() -> ResumeDocument {
        let mut doc = ResumeDocument::seeded();
        doc.full_name = "Jane Doe".into();
        doc.summary = "I write code.".into();
        doc.experience = vec![
            ExperienceEntry {
                company: "Acme".into(),
                description: "did things".into(),
                ..Default::default()
            },
            ExperienceEntry {
                company: "Globex".into(),
                description: "did other things".into(),
                ..Default::default()
            },
        ]
        .into();
        doc
    }

    #[tokio::test(start_paused = true)]
    async fn replaces_summary_and_first_job_only() {
        let enhanced = ScriptedEnhancer::default().enhance(document()).await;

        assert_eq!(enhanced.summary, ENHANCED_SUMMARY);
        assert_eq!(enhanced.experience.get(0).unwrap().description, ENHANCED_EXPERIENCE);
        assert_eq!(enhanced.experience.get(1).unwrap().description, "did other things");
        assert_eq!(enhanced.full_name, "Jane Doe");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_summary_stays_empty() {
        let mut doc = document();
        doc.summary.clear();
        doc.experience = EntryList::default();

        let enhanced = ScriptedEnhancer::default().enhance(doc.clone()).await;
        assert_eq!(enhanced, doc);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_the_configured_delay() {
        let start = tokio::time::Instant::now();
        ScriptedEnhancer::new(Duration::from_millis(2000))
            .enhance(document())
            .await;
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
