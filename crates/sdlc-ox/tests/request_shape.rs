//! End-to-end request body shape, without touching the network: the
//! rendered code-generation prompt must travel as `input`, next to the
//! configured model and project IDs.

use sdlc_ox::prompts;
use sdlc_ox::template::PromptTemplate;
use serde_json::Value;
use watsonx_ox::{DecodingMethod, TextGenParameters, TextGenerationRequest};

#[test]
fn code_generation_body_carries_the_rendered_template() {
    let prompt = PromptTemplate::from_template(prompts::CODE_GENERATION)
        .render(&[
            ("requirements", "Create a function to add two numbers"),
            ("language", "python"),
        ])
        .expect("render");

    let request = TextGenerationRequest::builder()
        .model_id("ibm/granite-3-3-8b-instruct")
        .input(prompt.clone())
        .parameters(
            TextGenParameters::builder()
                .decoding_method(DecodingMethod::Greedy)
                .max_new_tokens(1000)
                .temperature(0.7)
                .build(),
        )
        .project_id("f7f03912-0000-0000-0000-000000000000")
        .build();

    let body = serde_json::to_value(&request).expect("serialize");

    assert_eq!(body["model_id"], "ibm/granite-3-3-8b-instruct");
    assert_eq!(body["project_id"], "f7f03912-0000-0000-0000-000000000000");
    assert_eq!(body["input"], Value::from(prompt.clone()));

    let input = body["input"].as_str().expect("input is a string");
    assert!(input.contains("Create a function to add two numbers"));
    assert!(input.contains("production-ready python code"));
}
