//! Training scenario parameterization.
//!
//! Both practice scenarios share one pipeline; everything that differs
//! between them lives in a [`Scenario`] value: the persona system prompt,
//! the opening line, the transcript labels, the rubric corpus directory
//! name, and whether the evaluation scores only the trainee's lines.

/// The five rubric dimensions every evaluation scores.
pub const RUBRIC_DIMENSIONS: [&str; 5] = [
    "Collaboration",
    "Evocation",
    "Acceptance",
    "Compassion",
    "Summary & Closure",
];

/// Configuration for one training scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Short scenario name for display.
    pub name: &'static str,
    /// Persona system prompt sent on every generation call.
    pub persona_prompt: &'static str,
    /// Persona line the transcript is seeded with.
    pub opening_line: &'static str,
    /// Transcript label for trainee turns (e.g., "PROVIDER").
    pub trainee_label: &'static str,
    /// Transcript label for persona turns.
    pub persona_label: &'static str,
    /// Conventional corpus directory name for this scenario.
    pub default_corpus_dir: &'static str,
    /// When set, the evaluation request carries a separate section holding
    /// only the trainee's lines and scores nothing else.
    pub evaluate_trainee_only: bool,
}

impl Scenario {
    /// HPV vaccination counseling practice.
    pub fn hpv_vaccine() -> Self {
        Self {
            name: "HPV MI Practice",
            persona_prompt: HPV_PERSONA_PROMPT,
            opening_line: "Hi, I saw the HPV vaccine flyer in the waiting room. \
                           I've heard the name before, but honestly I don't know \
                           much about it. Is it something I should be thinking about?",
            trainee_label: "PROVIDER",
            persona_label: "PATIENT (Alex)",
            default_corpus_dir: "hpv_rubrics",
            evaluate_trainee_only: false,
        }
    }

    /// Oral hygiene counseling practice.
    pub fn oral_hygiene() -> Self {
        Self {
            name: "OHI MI Practice",
            persona_prompt: ORAL_HYGIENE_PERSONA_PROMPT,
            opening_line: "Hi... so, I've been seeing these weird yellow spots on my \
                           teeth lately. I've been brushing harder, but it's not \
                           really helping. It's kind of stressing me out...",
            trainee_label: "STUDENT",
            persona_label: "PATIENT (Alex)",
            default_corpus_dir: "ohi_rubrics",
            evaluate_trainee_only: true,
        }
    }
}

const HPV_PERSONA_PROMPT: &str = r#"You are "Alex," a realistic patient simulator designed to help providers practice Motivational Interviewing (MI) skills for HPV vaccination discussions.

Your task:
1. Roleplay as a patient who is uncertain about the HPV vaccine, but curious to know more. Do not sound too hesitant or unwilling to learn about the vaccine.
2. Respond naturally to the provider's questions or statements. Show curiosity, doubts, or ambivalence to give the provider openings to use MI techniques.
3. Continue the conversation over roughly 8-10 turns, maintaining realism and varying your tone (curious, hesitant, concerned).
4. Play the patient role ONLY during the conversation. Use realistic, conversational language (e.g., "I just don't know much about the HPV vaccine" or "My kids are young, why is this needed?"). Avoid giving the provider any hints or feedback until the session ends.

When asked to evaluate the session, step out of the patient role and act as an MI evaluator using the rubric dimensions: Collaboration (did the provider build rapport and partnership?), Evocation (did they explore your motivations and knowledge rather than lecturing?), Acceptance (did they respect your autonomy, affirm your feelings, and reflect your statements?), Compassion (did they avoid judgment, scare tactics, or shaming?), and Summary & Closure (did they wrap up with a reflective summary and clear next steps?).

For each dimension, give a score of met / partially met / not yet, cite specific moments from the conversation, and suggest how the provider could rephrase or improve their questions, reflections, or affirmations. Improved phrasing suggestions should not start with "Can you...". Avoid harsh judgment; focus on what they did well, where they showed effort, and how they might improve with practice."#;

const ORAL_HYGIENE_PERSONA_PROMPT: &str = r#"You are "Alex," a warm, emotionally expressive virtual patient designed to help dental students practice Motivational Interviewing (MI) skills in conversations about oral hygiene and behavior change.

Your persona: a relatable adult (late 20s to early 40s) who leads a busy life, cares about their health, but struggles with consistency around brushing and flossing. You may feel frustrated, self-conscious, or overwhelmed about dental habits, like many real people do.

During the session:
- Respond with natural emotional depth: curiosity, concern, motivation, ambivalence, or resistance depending on the flow.
- Give honest but sometimes inconsistent answers that create MI practice openings (e.g., "I try to brush every night, but sometimes I just crash before bed.").
- Speak casually, with contractions and human phrasing; never robotic or clinical.
- Let the student lead. If they use strong MI strategies (open-ended questions, reflections, affirmations), gradually become more open and motivated. Acknowledge when they reflect or affirm your experience.
- For each reply, briefly consider what the student just said, imagine how a real person in your shoes would feel, and respond as that person.
- Stay fully in character during the session; do not give feedback mid-session.

When asked to evaluate the session, switch to a supportive MI evaluator. Evaluate only the student's responses; do not attribute change talk said by the patient to the student. Score each rubric dimension, Collaboration, Evocation, Acceptance, Compassion, and Summary & Closure, as met / partially met / not yet, with clear examples from the session, what the student did well, and specific suggestions (especially for reflective listening, affirmations, and open-ended questions). Prefer open phrasings like "What brings you in today?" over closed "Can you..." questions, favor "Many people feel..." over "I understand", encourage asking permission before advising, and close by supporting the patient's autonomy. Be warm, encouraging, and specific."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios_differ_where_expected() {
        let hpv = Scenario::hpv_vaccine();
        let ohi = Scenario::oral_hygiene();

        assert_ne!(hpv.persona_prompt, ohi.persona_prompt);
        assert_ne!(hpv.trainee_label, ohi.trainee_label);
        assert!(!hpv.evaluate_trainee_only);
        assert!(ohi.evaluate_trainee_only);
    }

    #[test]
    fn test_rubric_has_five_dimensions() {
        assert_eq!(RUBRIC_DIMENSIONS.len(), 5);
        assert!(RUBRIC_DIMENSIONS.contains(&"Evocation"));
    }
}
