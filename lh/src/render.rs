//! Markdown rendering of completed plans
//!
//! Pure tree-to-text serialization: a table of contents linking to anchors,
//! then one section per subject with heading level equal to its depth.

use crate::domain::{Plan, Subject};

/// Anchor id for a subject name: lowercased, spaces replaced with hyphens
fn anchor(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

fn md_link(name: &str) -> String {
    format!("[{name}](#{})", anchor(name))
}

fn href(name: &str) -> String {
    format!("<a id='{}'></a>", anchor(name))
}

fn toc(subject: &Subject, level: usize) -> String {
    let indent = "  ".repeat(level);
    let mut content = format!("{indent} * {}\n", md_link(&subject.subject));
    for child in &subject.subjects {
        content.push_str(&toc(child, level + 1));
    }
    content
}

fn section(subject: &Subject, level: usize) -> String {
    let header_prefix = "#".repeat(level);
    let mut content = format!("{header_prefix} {}{}\n", subject.subject, href(&subject.subject));
    content.push_str(&format!("{}\n\n", subject.description));
    content.push_str(&format!("{}\n\n", subject.reason));

    for child in &subject.subjects {
        content.push_str(&section(child, level + 1));
    }

    if !subject.resources.is_empty() {
        content.push_str(&format!(
            "{header_prefix}# Resources{}\n",
            href(&format!("{}_resources", subject.subject))
        ));
        for resource in &subject.resources {
            content.push_str(&format!("* {}: {}\n", resource.title, resource.description));
        }
    }

    if !subject.exercises.is_empty() {
        content.push_str(&format!(
            "{header_prefix}# Exercises{}\n",
            href(&format!("{}_exercises", subject.subject))
        ));
        for exercise in &subject.exercises {
            content.push_str(&format!("* {}\n", exercise.description));
        }
    }

    content
}

/// Render a completed plan as Markdown
pub fn render_markdown(plan: &Plan, model_label: &str) -> String {
    let root = &plan.subject;
    let mut content = format!("# Learning Hub: {}\n", root.subject);
    content.push_str(&format!("(generated with {model_label})\n\n"));
    content.push_str(&format!("> {}\n\n", plan.goal));
    content.push_str(&toc(root, 0));
    content.push_str("\n\n");
    content.push_str(&section(root, 1));

    let mut trimmed = content.trim_end().to_string();
    trimmed.push('\n');
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Exercise, Resource};

    fn sample_plan() -> Plan {
        let mut root = Subject::new("Neural Networks", "the basics", "foundation");
        let mut child = Subject::new("Linear Algebra", "vectors", "prerequisite");
        child.resources.push(Resource {
            title: "Book".to_string(),
            description: "intro".to_string(),
        });
        child.exercises.push(Exercise {
            description: "multiply two matrices".to_string(),
        });
        root.subjects.push(child);
        Plan::new("learn neural networks", root)
    }

    #[test]
    fn test_anchor_lowercases_and_hyphenates() {
        assert_eq!(anchor("Neural Networks"), "neural-networks");
        assert_eq!(anchor("Rust"), "rust");
    }

    #[test]
    fn test_render_header_block() {
        let md = render_markdown(&sample_plan(), "gpt-3.5-turbo");
        assert!(md.starts_with("# Learning Hub: Neural Networks\n"));
        assert!(md.contains("(generated with gpt-3.5-turbo)"));
        assert!(md.contains("> learn neural networks"));
        assert!(md.ends_with('\n'));
    }

    #[test]
    fn test_render_toc_nesting_and_links() {
        let md = render_markdown(&sample_plan(), "test-model");
        assert!(md.contains(" * [Neural Networks](#neural-networks)"));
        assert!(md.contains("   * [Linear Algebra](#linear-algebra)"));
    }

    #[test]
    fn test_render_section_heading_level_matches_depth() {
        let md = render_markdown(&sample_plan(), "test-model");
        assert!(md.contains("# Neural Networks<a id='neural-networks'></a>"));
        assert!(md.contains("## Linear Algebra<a id='linear-algebra'></a>"));
    }

    #[test]
    fn test_render_resources_and_exercises() {
        let md = render_markdown(&sample_plan(), "test-model");
        // Sub-headings sit one level below their subject
        assert!(md.contains("### Resources<a id='linear-algebra_resources'></a>"));
        assert!(md.contains("* Book: intro"));
        assert!(md.contains("### Exercises<a id='linear-algebra_exercises'></a>"));
        assert!(md.contains("* multiply two matrices"));
    }

    #[test]
    fn test_render_skips_empty_resource_sections() {
        let plan = Plan::new("goal", Subject::new("Lone", "", ""));
        let md = render_markdown(&plan, "test-model");
        assert!(!md.contains("Resources"));
        assert!(!md.contains("Exercises"));
    }
}
