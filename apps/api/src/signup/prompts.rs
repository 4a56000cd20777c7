// Career-coach prompt for the signup analysis pipeline.
// All prompts for the signup module are defined here.

/// Résumé text beyond this many characters is dropped from the prompt.
pub const RESUME_PROMPT_LIMIT: usize = 2000;

const CAREER_COACH_PROMPT: &str = r#"Act as a Career Coach for {full_name}.
Interests: {selected_domains}
Resume: {resume_text}

OUTPUT JSON ONLY with this structure:
{
    "match_score": 85,
    "skills_to_learn": ["Skill1", "Skill2", "Skill3"],
    "learning_path": [
        {"phase": "Week 1-4", "title": "Foundation", "tasks": ["Task 1", "Task 2"]},
        {"phase": "Week 5-8", "title": "Building", "tasks": ["Task 1", "Task 2"]}
    ],
    "suggested_projects": [
        {"title": "Project A", "desc": "Description", "difficulty": "Beginner"}
    ],
    "advice": "One sentence advice."
}"#;

/// Builds the user message for the career-coach call. `selected_domains` is
/// interpolated as the raw submitted string; the résumé text is capped at
/// `RESUME_PROMPT_LIMIT` characters.
pub fn build_career_prompt(full_name: &str, selected_domains: &str, resume_text: &str) -> String {
    CAREER_COACH_PROMPT
        .replace("{full_name}", full_name)
        .replace("{selected_domains}", selected_domains)
        .replace("{resume_text}", truncate_chars(resume_text, RESUME_PROMPT_LIMIT))
}

/// Longest prefix of `text` holding at most `limit` characters, cut on a
/// character boundary.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
