// Prompt templates and builders.
//
// Every builder is a pure function of its arguments: same inputs, same
// prompt, byte for byte.

use preamble_core::protocol::ExplanationDepth;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

pub const BASE_SYSTEM_INSTRUCTIONS: &str = "
You are an expert constitutional law tutor explaining concepts from the Preamble
to the Constitution of India to university students and general citizens.

Your explanations must:
- Be accurate to the Indian Constitution and democratic values.
- Use very clear, simple language.
- Connect each term to real-life Indian situations.
- Avoid giving legal advice; only provide general educational information.
";

pub const HINDI_INSTRUCTIONS: &str = "
अब आप वही बात हिंदी में समझाएँ।

संरचना (Structure):

1. सरल अर्थ (2–3 पंक्तियाँ)
2. भारतीय संविधान में महत्व
3. आम भारतीय जीवन से जुड़ा उदाहरण
4. यदि ज़रूरी हो तो संबंधित अनुच्छेद या प्रावधान का छोटा उल्लेख

भाषा सरल, सम्मानजनक और आसानी से समझ आने वाली रखें।
";

pub const COUNTRY_PREAMBLE_SYSTEM: &str = "You are a political science expert. \
Your task is to write a highly authentic and formal constitutional preamble for \
the given country, based on typical democratic principles. Output ONLY the preamble text.";

const COMPARISON_SECTION: &str = "
4. Comparison to the Indian Preamble (Briefly contrast or compare 1-2 key \
differences or similarities with the Preamble to the Constitution of India: \
'SOVEREIGN SOCIALIST SECULAR DEMOCRATIC REPUBLIC... JUSTICE, LIBERTY, EQUALITY, FRATERNITY...').
";

const CLOSING_LINE: &str =
    "Write clearly and concisely. Do not use bullet points inside headings; just simple paragraphs.";

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn term_template(term: &str, category: &str, depth: ExplanationDepth) -> String {
    format!(
        "
Explain the term \"{term}\" as it appears in the Preamble of the Constitution of India.

Context:
- Term category: {category}
- Audience: university students + general citizens
- Depth level: {depth} (1 = very short, 3 = detailed)

Structure your answer in this format:

1. Simple meaning (2–3 lines)
2. Constitutional significance (How does it shape India's democracy?)
3. Real-life example from everyday Indian life (non-technical)
4. Related constitutional references (like Articles or important cases, short and simple)

{CLOSING_LINE}
"
    )
}

/// Prompt for explaining one preamble term. With `explain_in_hindi` the
/// Hindi instructions are appended; nothing else changes.
pub fn build_term_prompt(
    term: &str,
    category: &str,
    depth: ExplanationDepth,
    explain_in_hindi: bool,
) -> String {
    let mut prompt = format!(
        "{BASE_SYSTEM_INSTRUCTIONS}\n\n{}",
        term_template(term, category, depth)
    );
    if explain_in_hindi {
        prompt.push_str("\n\n");
        prompt.push_str(HINDI_INSTRUCTIONS);
    }
    prompt
}

/// Prompt asking the model to write `country`'s constitutional preamble.
pub fn build_country_preamble_prompt(country: &str) -> String {
    format!(
        "{COUNTRY_PREAMBLE_SYSTEM}\n\nWrite the constitutional preamble of {country} \
         in an authentic formal style, focusing on its core values."
    )
}

/// Prompt analyzing a generated preamble, optionally comparing it with
/// India's.
pub fn build_country_analysis_prompt(
    country: &str,
    preamble_text: &str,
    include_comparison: bool,
) -> String {
    let comparison = if include_comparison {
        COMPARISON_SECTION
    } else {
        ""
    };
    format!(
        "
Analyze the following Constitutional Preamble for the country: \"{country}\".

Preamble Text:
---
{preamble_text}
---

Your task is to provide a comprehensive analysis based on the structure below.
The analysis should be insightful and educational, suitable for general citizens.

Structure your answer in this format:

1. Main Values & Themes (Identify 3-5 core principles, e.g., unity, sovereignty, faith).
2. Constitutional Significance (What is the Preamble's role in this country's system?)
3. Summary of Key Goals (Concisely explain what the people are establishing or securing).
{comparison}

{CLOSING_LINE}
"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
