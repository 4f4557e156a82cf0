// All prompt constants for the analysis pipeline.
//
// Both prompts embed the same truncated resume text under a literal
// "Resume:" heading. `{job_title}` interpolates verbatim; an empty job
// title needs no special casing.

/// Match prompt template. Replace `{job_title}` and `{resume}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = "You are an expert resume reviewer. \
Given the following resume and the target job title: \"{job_title}\", determine if the resume \
matches the job title. Respond with a match percentage (1-100%) and a brief explanation. \
Do not provide detailed feedback yet. Do not repeat this prompt or any part of it in your \
response.\n\nResume:\n{resume}";

/// Feedback prompt template. Replace `{job_title}` and `{resume}` before sending.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = "You are a professional resume reviewer. \
Do NOT copy or repeat the resume text. Do NOT start with a generic introduction. \
For each line or section of the following resume, provide concise, actionable suggestions \
for improvement. Reference the specific line or section you are commenting on, but do not \
repeat the full text. Focus on clarity, impact, and relevance to the target job: {job_title}. \
Only provide feedback and suggestions, not a summary or generic advice.\
\n\nResume:\n{resume}\n\n\
Format your response as a list of suggestions, each referencing the relevant line or section.";

/// Both prompts for one analysis request, built from the same working text.
#[derive(Debug, Clone)]
pub struct Prompts {
    pub match_prompt: String,
    pub feedback_prompt: String,
}

/// Fills both templates. `resume` must already be sanitized and truncated.
pub fn build_prompts(resume: &str, job_title: &str) -> Prompts {
    Prompts {
        match_prompt: MATCH_PROMPT_TEMPLATE
            .replace("{job_title}", job_title)
            .replace("{resume}", resume),
        feedback_prompt: FEEDBACK_PROMPT_TEMPLATE
            .replace("{job_title}", job_title)
            .replace("{resume}", resume),
    }
}
