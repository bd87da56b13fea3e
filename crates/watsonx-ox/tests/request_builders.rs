use serde_json::Value;
use watsonx_ox::{DecodingMethod, Model, TextGenParameters, TextGenerationRequest};

#[test]
fn test_generation_request_builder() {
    let request = TextGenerationRequest::builder()
        .model_id(Model::Granite33_8bInstruct)
        .input("Hello, how are you?")
        .build();

    assert_eq!(request.model_id, "ibm/granite-3-3-8b-instruct");
    assert_eq!(request.input, "Hello, how are you?");
    assert!(request.parameters.is_none());
    assert!(request.project_id.is_none());
}

#[test]
fn test_parameters_builder() {
    let parameters = TextGenParameters::builder()
        .decoding_method(DecodingMethod::Greedy)
        .max_new_tokens(1000)
        .min_new_tokens(1)
        .temperature(0.7)
        .top_k(50)
        .top_p(1.0)
        .build();

    assert_eq!(parameters.decoding_method, Some(DecodingMethod::Greedy));
    assert_eq!(parameters.max_new_tokens, Some(1000));
    assert_eq!(parameters.min_new_tokens, Some(1));
    assert_eq!(parameters.temperature, Some(0.7));
    assert_eq!(parameters.top_k, Some(50));
    assert_eq!(parameters.top_p, Some(1.0));
    assert!(parameters.repetition_penalty.is_none());
    assert!(parameters.random_seed.is_none());
}

#[test]
fn test_unset_parameters_are_omitted_from_the_body() {
    let parameters = TextGenParameters::builder()
        .decoding_method(DecodingMethod::Greedy)
        .max_new_tokens(200)
        .build();

    let body = serde_json::to_value(&parameters).expect("serialize");
    let object = body.as_object().expect("object");

    assert_eq!(object.get("decoding_method"), Some(&Value::from("greedy")));
    assert_eq!(object.get("max_new_tokens"), Some(&Value::from(200)));
    assert!(!object.contains_key("temperature"));
    assert!(!object.contains_key("stop_sequences"));
    assert!(!object.contains_key("repetition_penalty"));
}

#[test]
fn test_request_body_shape() {
    let request = TextGenerationRequest::builder()
        .model_id(Model::Granite33_8bInstruct)
        .input("Write a haiku about compilers.")
        .parameters(
            TextGenParameters::builder()
                .decoding_method(DecodingMethod::Sample)
                .temperature(0.7)
                .top_p(0.9)
                .stop_sequences(vec!["###".to_string()])
                .build(),
        )
        .project_id("my-project")
        .build();

    let body = serde_json::to_value(&request).expect("serialize");

    assert_eq!(body["model_id"], "ibm/granite-3-3-8b-instruct");
    assert_eq!(body["input"], "Write a haiku about compilers.");
    assert_eq!(body["project_id"], "my-project");
    assert_eq!(body["parameters"]["decoding_method"], "sample");
    assert_eq!(body["parameters"]["stop_sequences"][0], "###");
}

#[test]
fn test_with_project_id_replaces_the_previous_scope() {
    let request = TextGenerationRequest::builder()
        .model_id("ibm/granite-3-3-8b-instruct")
        .input("Hello")
        .project_id("old-project")
        .build()
        .with_project_id("new-project");

    assert_eq!(request.project_id.as_deref(), Some("new-project"));
}
