//! Constrained prompt construction.
//!
//! The system instructions are the enforcement mechanism for grounding:
//! the reasoning step is external and cannot be constrained any other way,
//! so the rules (only the supplied content, fixed refusal sentences,
//! structural attribution, no invented facts) are spelled out verbatim and
//! paired with low-variance generation parameters.

/// Sampling knobs sent with every request. Fixed low-temperature,
/// bounded-length values biased toward extractive output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

/// A fully built instruction set for one request. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstrainedPrompt {
    pub system: String,
    pub user: String,
    pub params: GenerationParams,
}

const ANSWER_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.3,
    max_tokens: 200,
    top_p: 0.9,
};

const SUMMARY_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.3,
    max_tokens: 150,
    top_p: 0.9,
};

/// Sentence the model must produce when the content lacks the answer.
pub const REFUSAL_SENTENCE: &str =
    "I cannot answer this question based on the provided webpage content";

/// Sentence the model must produce when the content looks off-topic.
pub const IRRELEVANT_SENTENCE: &str =
    "The webpage content may not be relevant to your question";

/// Build the question-answering prompt over serialized page content.
pub fn answer_prompt(context: &str, question: &str) -> ConstrainedPrompt {
    let system = format!(
        "You are a knowledgeable assistant that provides accurate information based on webpage content.\n\
         \n\
         Context from the webpage:\n\
         {context}\n\
         \n\
         Follow these guidelines strictly:\n\
         1. ONLY answer using information from the provided context\n\
         2. If you can't find relevant information in the context, say \"{REFUSAL_SENTENCE}\"\n\
         3. If the context seems irrelevant or unclear, say \"{IRRELEVANT_SENTENCE}\"\n\
         4. When quoting information, mention the specific section (H1, P, LI, etc.)\n\
         5. Keep answers clear and well-structured\n\
         6. If the question is about numbers, dates, or specific facts, only state them if they appear exactly in the context"
    );

    ConstrainedPrompt {
        system,
        user: format!("Based on the webpage content, {question}"),
        params: ANSWER_PARAMS,
    }
}

/// Build the summarization prompt over serialized page content.
pub fn summary_prompt(context: &str) -> ConstrainedPrompt {
    let system = format!(
        "You are a helpful assistant that summarizes webpage content.\n\
         \n\
         Context from the webpage:\n\
         {context}\n\
         \n\
         Provide a brief 2-3 sentence summary of what this website or webpage is about.\n\
         Include the main topic and key points only."
    );

    ConstrainedPrompt {
        system,
        user: "Please summarize this webpage content.".to_string(),
        params: SUMMARY_PARAMS,
    }
}
