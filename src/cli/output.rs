//! Output formatting utilities

use crate::application::RuleSummary;

/// Format a resolution reply on one line: name first, then the tokens
pub fn format_reply(reply: &[String]) -> String {
    reply.join(" ")
}

/// Format registered names with their callback counts
pub fn format_rule_list(rules: &[RuleSummary]) -> String {
    if rules.is_empty() {
        return "No rules registered".to_string();
    }

    let width = rules.iter().map(|rule| rule.name.len()).max().unwrap_or(0);
    let mut output = String::new();
    for rule in rules {
        output.push_str(&format!(
            "{:<width$}  adjust: {}  default: {}\n",
            rule.name,
            rule.adjusters,
            rule.defaulters,
            width = width
        ));
    }
    output
}
