use std::collections::HashSet;

use crate::model::*;

/// Parse a quiz file. JSON files are read through the YAML parser as well.
pub fn parse_quiz(content: &str, quiz_file: &str) -> Result<Quiz, String> {
    let mut quiz: Quiz = serde_yaml::from_str(content)
        .map_err(|e| format!("Invalid quiz file {}: {}", quiz_file, e))?;

    let mut seen: HashSet<QuestionId> = HashSet::new();
    for (idx, q) in quiz.questions.iter_mut().enumerate() {
        let position = idx + 1;

        if q.id.as_str().trim().is_empty() {
            return Err(format!("{}: question {} has an empty id", quiz_file, position));
        }
        if !seen.insert(q.id.clone()) {
            return Err(format!(
                "{}: duplicate question id {:?} (question {})",
                quiz_file,
                q.id.as_str(),
                position
            ));
        }
        if q.text.trim().is_empty() {
            return Err(format!("{}: question {} has no text", quiz_file, position));
        }
        if q.option_a.is_empty() || q.option_b.is_empty() {
            return Err(format!(
                "{}: question {} needs both option_a and option_b",
                quiz_file, position
            ));
        }

        q.option_c = normalize_option(q.option_c.take());
        q.option_d = normalize_option(q.option_d.take());
    }

    Ok(quiz)
}

pub fn load_quiz(path: &std::path::Path) -> Result<Quiz, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read quiz file {}: {}", path.display(), e))?;

    let quiz_filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    parse_quiz(&content, &quiz_filename)
}

fn normalize_option(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
