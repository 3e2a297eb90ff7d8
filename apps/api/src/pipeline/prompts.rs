pub const LANGUAGE_PROMPT: &str = r#"Identify the dominant language(s) of the resume text below.

Return JSON of the form:
{"languages": [{"language_code": "<ISO 639-1 code>", "score": <0.0-1.0>}]}
Order by score, highest first. Return {"languages": []} if the language cannot be determined.

TEXT:
{text}"#;

pub const ENTITY_PROMPT: &str = r#"Detect named entities in the resume text below, which is written in language '{language}'.

Classify each entity with exactly one of these types:
PERSON, ORGANIZATION, DATE, LOCATION, QUANTITY, TITLE, EVENT, COMMERCIAL_ITEM, OTHER.
Universities, colleges, schools and employers are ORGANIZATION.
Report every occurrence in reading order, copying the text exactly as it appears.

Return JSON of the form:
{"entities": [{"text": "<span>", "type": "<TYPE>", "score": <0.0-1.0>}]}

TEXT:
{text}"#;

pub const KEY_PHRASE_PROMPT: &str = r#"Extract the key noun phrases from the resume text below, which is written in language '{language}'.

Prefer technologies, tools, skills, certifications and domains. Copy each phrase exactly as it appears, in reading order.

Return JSON of the form:
{"key_phrases": [{"text": "<phrase>", "score": <0.0-1.0>}]}

TEXT:
{text}"#;
