// Fixed instruction templates for the two model calls.
// Placeholders use `{name}` and are rendered with `str::replace`; no
// templating engine is warranted for two static prompts.

/// System prompt for job extraction: the output is parsed strictly as JSON,
/// so the model is told to emit nothing else.
pub const EXTRACT_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Extraction template. `{page_data}` is the normalised careers page text.
pub const EXTRACT_PROMPT_TEMPLATE: &str = "\
### SCRAPED TEXT FROM WEBSITE:
{page_data}

### INSTRUCTION:
The text is from a careers page.
Extract all job postings and return a JSON array.
Each job object should contain:
- role
- company (if available)
- location (if available)
- experience_level (if available)
- short_description

Only return valid JSON.
### VALID JSON (NO PREAMBLE):";

/// System prompt for email drafting. Output is displayed verbatim; the
/// formatting constraints are advisory to the model, not enforced.
pub const EMAIL_SYSTEM: &str =
    "You write concise, professional business development emails. \
    Respond with the email body only.";

/// Email template. `{job_description}` is the rendered job block,
/// `{link_list}` the bulleted portfolio links.
pub const EMAIL_PROMPT_TEMPLATE: &str = "\
### JOB DESCRIPTION:
{job_description}

### INSTRUCTION:
You are Mohan, a Business Development Executive at AtliQ.

AtliQ is an AI & Software Consulting company helping enterprises with:
- AI-driven automation
- Scalable software systems
- Process optimization
- Cost reduction

Write a concise, professional cold email explaining how
AtliQ can help fulfill the needs of the role above.

Include ONLY the most relevant portfolio links below:
{link_list}

Constraints:
- No preamble
- No subject line
- Professional business tone

### EMAIL:";
