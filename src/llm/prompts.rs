//! Prompt text for dialogue turns and rubric evaluation.

/// Collection of prompts used for dialogue and evaluation requests.
pub struct Prompts;

impl Prompts {
    /// Turn-taking instruction sent as an extra system message on every
    /// dialogue call.
    pub fn turn_instruction() -> &'static str {
        "Follow the MI chain-of-thought steps: identify the routine, ask an open \
         question, reflect, elicit change talk, then summarize and plan. Reply \
         with a single in-character patient message."
    }

    /// Build the user message for an evaluation request.
    ///
    /// `trainee_lines` is present when the scenario evaluates only the
    /// trainee's side of the conversation; the lines are repeated in their
    /// own section so the scoring cannot drift onto the persona's words.
    pub fn evaluation_request(
        rendered_transcript: &str,
        trainee_label: &str,
        trainee_lines: Option<&str>,
        grounding_context: &str,
        rubric_dimensions: &[&str],
    ) -> String {
        let dimensions = rubric_dimensions.join(", ");

        let mut request = format!(
            r#"Here is the full practice session transcript:
{rendered_transcript}
"#
        );

        if let Some(lines) = trainee_lines {
            request.push_str(&format!(
                r#"
Evaluate only the responses under evaluation below (the lines marked '{trainee_label}'). Do not attribute change talk or motivational statements made by the patient to the trainee.

Responses under evaluation:
{lines}
"#
            ));
        }

        request.push_str(&format!(
            r#"
Relevant MI knowledge:
{grounding_context}

Based on the MI rubric, evaluate the trainee's MI skills.
Provide feedback with a score for each of: {dimensions}.
For each dimension, cite evidence from the session, highlight what was done well, and suggest specific improvements (especially for reflective listening, affirmations, and open-ended questions).
"#
        ));

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_request_names_every_dimension() {
        let request = Prompts::evaluation_request(
            "PATIENT: hi\nPROVIDER: hello",
            "PROVIDER",
            None,
            "some rubric text",
            &["Collaboration", "Evocation"],
        );

        assert!(request.contains("PATIENT: hi"));
        assert!(request.contains("some rubric text"));
        assert!(request.contains("Collaboration, Evocation"));
        assert!(!request.contains("Responses under evaluation"));
    }

    #[test]
    fn test_trainee_only_section_is_included_when_requested() {
        let request = Prompts::evaluation_request(
            "PATIENT: hi\nSTUDENT: hello",
            "STUDENT",
            Some("STUDENT: hello"),
            "",
            &["Compassion"],
        );

        assert!(request.contains("Responses under evaluation:\nSTUDENT: hello"));
        assert!(request.contains("lines marked 'STUDENT'"));
    }
}
