//! Markdown rendering for editor hovers and terminal output.

use crate::parser::schema::Issue;
use std::fmt::Write;

/// Render the hover card for the issues on one line
///
/// **Public** - empty input renders an empty string
///
/// # Example
/// ```text
/// ### 🐞 GlitchTip: 1 Issue(s) Here
///
/// **[WEB-1] NoMethodError: undefined method `name' for nil**
/// Events: 12 | [Open](https://app.glitchtip.com/acme/issues/1)
/// ---
/// ```
pub fn render_hover(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return String::new();
    }

    let mut markdown = format!("### 🐞 GlitchTip: {} Issue(s) Here\n", issues.len());

    for issue in issues {
        // Writing to a String cannot fail
        let _ = write!(
            markdown,
            "\n**[{}] {}**\nEvents: {} | [Open]({})\n---\n",
            issue.short_id, issue.title, issue.event_count, issue.permalink
        );
    }

    markdown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_hover() {
        let issues = vec![
            Issue {
                id: "1".to_string(),
                short_id: "WEB-1".to_string(),
                title: "TypeError".to_string(),
                event_count: "12".to_string(),
                permalink: "https://gt.example/i/1".to_string(),
            },
            Issue {
                id: "2".to_string(),
                short_id: "WEB-2".to_string(),
                title: "RangeError".to_string(),
                event_count: "3".to_string(),
                permalink: "https://gt.example/i/2".to_string(),
            },
        ];

        let markdown = render_hover(&issues);

        assert!(markdown.starts_with("### 🐞 GlitchTip: 2 Issue(s) Here\n"));
        assert!(markdown.contains("\n**[WEB-1] TypeError**\nEvents: 12 | [Open](https://gt.example/i/1)\n---\n"));
        assert!(markdown.ends_with("**[WEB-2] RangeError**\nEvents: 3 | [Open](https://gt.example/i/2)\n---\n"));
    }

    #[test]
    fn test_render_hover_empty() {
        assert_eq!(render_hover(&[]), "");
    }
}
