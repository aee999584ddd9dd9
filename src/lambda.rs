#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use lottery_skill::adapters::alexa::{self, RequestEnvelope};
#[cfg(feature = "lambda")]
use lottery_skill::core::dialog;
#[cfg(feature = "lambda")]
use lottery_skill::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use lottery_skill::{DynamoGateway, LambdaConfig, RequestHandler, SkillEngine};
#[cfg(feature = "lambda")]
use serde_json::Value;

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let envelope: RequestEnvelope = serde_json::from_value(event.payload)?;

    let config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&aws_config);
    let gateway = DynamoGateway::new(client, config.table_name.clone());

    let Some(request) = envelope.to_skill_request() else {
        tracing::warn!("unrecognized request type in envelope");
        return Ok(alexa::render_response(&dialog::fallback_response()));
    };
    let session_key = envelope.session_key().unwrap_or("anonymous").to_string();

    let engine = SkillEngine::new(gateway, config);
    let response = engine
        .handle(&session_key, request)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    Ok(alexa::render_response(&response))
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
