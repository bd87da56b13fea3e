use sdlc_ox::{Assistant, ClassificationResult, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let assistant = Assistant::from_config(&config);

    let requirements = "\
The system should:
1. Allow users to register and login
2. Process payments securely
3. Handle 1000 concurrent users
4. Provide real-time notifications";

    println!("📋 Classifying requirements...");
    match assistant.classify_requirements(requirements).await {
        result @ ClassificationResult::Parsed(_) => {
            println!("✅ Classification:");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        ClassificationResult::Failed {
            error,
            raw_response,
        } => {
            println!("❌ {error}");
            if !raw_response.is_empty() {
                println!("Raw response:\n{raw_response}");
            }
        }
    }

    Ok(())
}
