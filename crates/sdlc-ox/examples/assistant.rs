use sdlc_ox::{Assistant, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Needs WATSONX_API_KEY and WATSONX_PROJECT_ID; set SDLC_BACKEND=chain
    // to switch from the greedy profile to the sampling pipeline.
    let config = Config::from_env()?;
    println!("🔧 Using backend: {}", config.backend);

    let assistant = Assistant::from_config(&config);

    let requirements = "Create a function to add two numbers";
    println!("📝 Generating python code for: {requirements}");
    let code = assistant.generate_code(requirements, "python").await;
    println!("--- code ---\n{code}\n");

    println!("🧪 Generating pytest cases for the result...");
    let tests = assistant.generate_tests(&code, "pytest").await;
    println!("--- tests ---\n{tests}\n");

    println!("📊 Summarizing the generated code...");
    let summary = assistant.summarize_code(&code).await;
    println!("--- summary ---\n{summary}\n");

    let reply = assistant
        .chat("How should I handle division by zero in Python?", "")
        .await;
    println!("--- chat ---\n{reply}");

    Ok(())
}
