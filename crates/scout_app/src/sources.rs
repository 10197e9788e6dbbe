use anyhow::Context;
use scout_core::{KeywordFilter, Task};
use scout_engine::FragmentSelector;

/// The career pages scanned on every run.
pub fn default_tasks() -> Vec<Task> {
    vec![
        Task::with_keywords(
            "https://linusmediagroup.com/careers",
            ".accordion-item__title",
            KeywordFilter::default(),
        ),
        Task::with_keywords(
            "https://vercel.com/careers",
            "a[href^='/careers/'] p:first-of-type",
            KeywordFilter::default(),
        ),
        Task::with_keywords(
            "https://stripe.com/jobs/search",
            ".JobsListings__link",
            KeywordFilter::default(),
        ),
    ]
}

/// Rejects a source list that could never produce a request.
pub fn validate(tasks: &[Task]) -> anyhow::Result<()> {
    for task in tasks {
        task.check()?;
        FragmentSelector::parse(task.selector())
            .with_context(|| format!("source {}", task.source_url()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_sources_are_valid() {
        let tasks = default_tasks();
        assert_eq!(tasks.len(), 3);
        validate(&tasks).unwrap();
    }

    #[test]
    fn bad_selector_fails_validation() {
        let tasks = vec![Task::with_keywords(
            "https://example.com/jobs",
            "div[",
            KeywordFilter::default(),
        )];
        let err = validate(&tasks).unwrap_err();
        assert!(err.to_string().contains("https://example.com/jobs"));
    }
}
