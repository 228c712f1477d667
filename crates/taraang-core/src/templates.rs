//! # Text Templates
//!
//! Tera templates compiled into the crate: the operator email and the two
//! language model prompts.
//!
//! ```text
//! templates/
//! ├── operator_email.html.tera   → "operator_email.html"  (autoescaped)
//! ├── screening_prompt.txt.tera  → "screening_prompt.txt"
//! └── layout_prompt.txt.tera     → "layout_prompt.txt"
//! ```
//!
//! Tera escapes values only in templates whose name ends in `.html`, so
//! submitter text is escaped in the email and passed through untouched in
//! the prompts.

use std::sync::OnceLock;
use tera::{Context, Tera};

use crate::error::CoreResult;

pub const OPERATOR_EMAIL_TEMPLATE: &str = "operator_email.html";
pub const SCREENING_PROMPT_TEMPLATE: &str = "screening_prompt.txt";
pub const LAYOUT_PROMPT_TEMPLATE: &str = "layout_prompt.txt";

const SOURCES: [(&str, &str); 3] = [
    (
        OPERATOR_EMAIL_TEMPLATE,
        include_str!("../templates/operator_email.html.tera"),
    ),
    (
        SCREENING_PROMPT_TEMPLATE,
        include_str!("../templates/screening_prompt.txt.tera"),
    ),
    (
        LAYOUT_PROMPT_TEMPLATE,
        include_str!("../templates/layout_prompt.txt.tera"),
    ),
];

fn tera() -> &'static Tera {
    static TERA: OnceLock<Tera> = OnceLock::new();
    TERA.get_or_init(|| {
        let mut tera = Tera::default();
        tera.add_raw_templates(SOURCES)
            .expect("embedded templates are valid tera");
        tera
    })
}

/// Renders one of the embedded templates.
pub fn render(name: &str, context: &Context) -> CoreResult<String> {
    Ok(tera().render(name, context)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_parses() {
        let names: Vec<&str> = tera().get_template_names().collect();
        for (name, _) in SOURCES {
            assert!(names.contains(&name), "{} missing", name);
        }
    }

    #[test]
    fn test_html_templates_escape() {
        let mut context = Context::new();
        context.insert("business", "Taraang Events");
        for key in ["name", "email", "phone", "event_type"] {
            context.insert(key, "x");
        }
        context.insert("message", "<script>alert('hi')</script>");
        let html = render(OPERATOR_EMAIL_TEMPLATE, &context).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        assert!(render(SCREENING_PROMPT_TEMPLATE, &Context::new()).is_err());
    }
}
