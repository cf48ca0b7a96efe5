//! Prompt text fragments. Every string the model sees is built here so the
//! framing for each mode can be read in one place.

/// Shared brevity directive appended to summary-style instructions.
pub const BREVITY_DIRECTIVE: &str = "Give the response straightforwardly in one line, \
but if the user asks for details (or uses a word like \"detail\"), explain it in detail.";

pub const CONTENT_UNAVAILABLE: &str = "Content not available";

// ── SingleFile ──────────────────────────────────────────────────────

pub fn format_single_file_prompt(name: &str, relative_path: &str, content: &str) -> String {
    let location = if relative_path.is_empty() || relative_path == name {
        String::new()
    } else {
        format!("Path: {relative_path}\n")
    };
    format!(
        "\
Analyze the following file named \"{name}\".
Provide a comprehensive summary, key points, and identify any potential issues or improvements.
- {BREVITY_DIRECTIVE}

{location}File Content:
{content}
"
    )
}

// ── ProjectSummary ──────────────────────────────────────────────────

pub fn format_summary_preamble() -> String {
    format!(
        "Analyze the following project files and provide a high-level summary of the project, \
its architecture, and functionality. {BREVITY_DIRECTIVE}\n\n"
    )
}

pub fn format_summary_section(name: &str, content: &str) -> String {
    format!("--- File: {name} ---\n{content}\n\n")
}

pub fn format_summary_placeholder(name: &str) -> String {
    format!("--- File: {name} ---\n{CONTENT_UNAVAILABLE}\n\n")
}

// ── ContextualQuery ─────────────────────────────────────────────────

pub fn format_query_preamble(project_name: &str, user_query: &str) -> String {
    format!(
        "\
You are an expert AI coding assistant analyzing the project \"{project_name}\".

IMPORTANT FORMATTING RULES:
- Use proper markdown formatting in your responses
- Wrap code snippets in triple backticks with a language identifier
- Use **bold** for important terms and concepts
- Use bullet points (-) for lists
- Use numbered lists (1., 2., 3.) for sequential steps
- Use headers (##, ###) to organize longer responses
- Reference specific files and line numbers when relevant
- Keep explanations clear and concise
- {BREVITY_DIRECTIVE}

USER QUESTION: \"{user_query}\"

PROJECT FILES CONTEXT:
"
    )
}

pub fn format_query_section(name: &str, relative_path: &str, content: &str) -> String {
    format!("\n--- File: {name} ({relative_path}) ---\n```\n{content}\n```\n")
}

pub fn format_query_placeholder(name: &str, relative_path: &str) -> String {
    format!("\n--- File: {name} ({relative_path}) ---\n[{CONTENT_UNAVAILABLE}]\n")
}

pub fn format_query_instructions(included_count: usize) -> String {
    format!(
        "\n\nINSTRUCTIONS:
Based on the {included_count} files provided above, answer the user's question with:
1. Clear, well-formatted markdown
2. Code examples in proper code blocks with syntax highlighting
3. Specific references to files and code when relevant
4. Organized structure with headers and lists
5. Concise but comprehensive explanations

Your response:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_prompt_mentions_path_only_when_nested() {
        let flat = format_single_file_prompt("a.txt", "a.txt", "hi");
        assert!(!flat.contains("Path:"));
        let nested = format_single_file_prompt("a.txt", "docs/a.txt", "hi");
        assert!(nested.contains("Path: docs/a.txt\n"));
        assert!(nested.ends_with("File Content:\nhi\n"));
    }

    #[test]
    fn query_preamble_quotes_question_verbatim() {
        let p = format_query_preamble("demo", "where is \"main\" defined?");
        assert!(p.contains("analyzing the project \"demo\""));
        assert!(p.contains("USER QUESTION: \"where is \"main\" defined?\""));
        assert!(p.ends_with("PROJECT FILES CONTEXT:\n"));
    }

    #[test]
    fn query_section_fences_content() {
        let s = format_query_section("lib.rs", "src/lib.rs", "pub fn f() {}");
        assert_eq!(s, "\n--- File: lib.rs (src/lib.rs) ---\n```\npub fn f() {}\n```\n");
    }

    #[test]
    fn instructions_restate_count() {
        assert!(format_query_instructions(7).contains("Based on the 7 files provided above"));
    }

    #[test]
    fn instructions_are_set_off_by_a_blank_line() {
        let closing = format_query_instructions(1);
        assert!(closing.starts_with("\n\nINSTRUCTIONS:\n"));
        let section = format_query_section("a.rs", "a.rs", "x");
        assert!(format!("{section}{closing}").contains("```\n\n\nINSTRUCTIONS:"));
    }
}
