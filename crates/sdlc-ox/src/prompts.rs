//! Prompt bodies for the assistant operations.
//!
//! Slots use the `{name}` syntax of [`crate::template::PromptTemplate`].

/// Slots: `{language}`, `{requirements}`.
pub const CODE_GENERATION: &str = "You are an expert software developer. Generate high-quality, production-ready {language} code based on the following requirements.

Requirements: {requirements}

Please provide:
1. Clean, well-documented code
2. Proper error handling
3. Best practices implementation
4. Comments explaining key functionality

Generate only the code with appropriate comments. Do not include explanations outside the code.

Code:";

/// Slots: `{framework}`, `{code}`.
pub const TEST_GENERATION: &str = "You are a QA engineer. Generate comprehensive test cases using {framework} for the following code:

Code:
{code}

Generate:
1. Unit tests covering all functions
2. Edge cases and error handling tests
3. Integration tests if applicable
4. Test data and fixtures

Provide only the test code with appropriate imports and setup.

Test Code:";

/// Slots: `{code}`, `{error_description}`.
pub const BUG_FIX: &str = "You are a senior software engineer. Fix the bugs in the following code:

Code with bugs:
{code}

Error/Issue description:
{error_description}

Provide:
1. Fixed code with corrections highlighted in comments
2. Brief explanation of what was wrong
3. Best practices to prevent similar issues

Focus on providing the corrected code with clear comments indicating fixes.

Fixed Code:";

/// Slots: `{code}`.
pub const CODE_SUMMARY: &str = "You are a technical documentation expert. Analyze and summarize the following code:

Code:
{code}

Provide a comprehensive analysis including:
1. High-level summary of functionality
2. Key components and their purposes
3. Input/output description
4. Dependencies and requirements
5. Potential improvements or concerns

Format your response in clear sections with headings.

Analysis:";

/// Slots: `{requirements}`. The model is instructed to answer with a single
/// JSON object; see [`crate::classify`] for the extraction step.
pub const REQUIREMENTS_CLASSIFICATION: &str = "You are a business analyst. Classify the following requirements into structured categories:

Requirements:
{requirements}

Analyze and classify into:
1. Functional Requirements
2. Non-functional Requirements
3. Technical Requirements
4. Business Requirements
5. Priority Level (High/Medium/Low)
6. Complexity Estimate (Simple/Medium/Complex)

Format the output as a valid JSON object with these exact keys:
- \"Functional Requirements\": [list of items]
- \"Non-functional Requirements\": [list of items]
- \"Technical Requirements\": [list of items]
- \"Business Requirements\": [list of items]
- \"Priority Level\": \"High/Medium/Low\"
- \"Complexity Estimate\": \"Simple/Medium/Complex\"

Respond with only the JSON object, no additional text.

JSON:";

/// Slots: `{context_section}`, `{query}`. `context_section` is either empty
/// or a `Context: ...` line built by the assistant.
pub const CHAT_ASSISTANT: &str = "You are a helpful AI assistant specialized in software development and programming.

{context_section}
User Query: {query}

Provide a helpful, accurate response that:
1. Directly answers the question
2. Provides code examples if relevant
3. Explains technical concepts clearly
4. Suggests best practices
5. Keeps responses concise and actionable

Response:";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::PromptTemplate;

    #[test]
    fn every_prompt_declares_the_expected_slots() {
        let cases: [(&str, &[&str]); 6] = [
            (CODE_GENERATION, &["language", "requirements"]),
            (TEST_GENERATION, &["framework", "code"]),
            (BUG_FIX, &["code", "error_description"]),
            (CODE_SUMMARY, &["code"]),
            (REQUIREMENTS_CLASSIFICATION, &["requirements"]),
            (CHAT_ASSISTANT, &["context_section", "query"]),
        ];

        for (body, expected) in cases {
            let template = PromptTemplate::from_template(body);
            assert_eq!(template.slots(), expected);
        }
    }
}
