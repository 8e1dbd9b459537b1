//! Behavior tests for one click: fetch price, build prompt, ask the model,
//! render the result.

use tradewise_core::{ModelErrorKind, OutcomeView};
use tradewise_tests::{
    assistant_with, intraday_body, AssistantError, CannedHttpClient, HttpError, ModelError,
    Report, ScriptedModel,
};

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn user_types_tsla_and_sees_price_and_model_reply() {
    // Given: the provider quotes TSLA at 240.10 and the model says hold
    let http = CannedHttpClient::ok(intraday_body(
        "TSLA",
        &[("2024-01-02 09:31:00", "240.10"), ("2024-01-02 09:30:00", "239.80")],
    ));
    let model = ScriptedModel::replying("Hold: volatility is elevated ahead of deliveries.");
    let assistant = assistant_with(http, model);

    // When: the user submits lowercase input
    let outcome = assistant.run("tsla").await;

    // Then: the rendered output has the price line and the literal reply
    let text = Report::from_outcome(&outcome).to_text();
    assert!(text.contains("TSLA is currently $240.10"), "got: {text}");
    assert!(text.contains("TSLA is currently $240.10 (as of 2024-01-02 09:31:00)\n"));
    assert!(text.contains("Hold: volatility is elevated ahead of deliveries."));
    assert!(!text.contains("Something went wrong"));
}

#[tokio::test]
async fn prompt_carries_literal_symbol_and_price() {
    let http = CannedHttpClient::ok(intraday_body("AAPL", &[("2024-01-01 10:00:00", "150.25")]));
    let model = ScriptedModel::replying("Buy");
    let assistant = assistant_with(http, model.clone());

    assistant.run("AAPL").await;

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.model, "gpt-3.5-turbo");
    assert!((request.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(request.messages.len(), 1);
    assert_eq!(
        request.messages[0].content,
        "The current price of AAPL is $150.25. Provide a concise yet smart trading insight (buy/sell/hold), with reasoning and risk advice."
    );
}

// =============================================================================
// Failure paths
// =============================================================================

#[tokio::test]
async fn missing_time_series_reaches_error_path_without_model_call() {
    // Given: the provider answers without a time series
    let http = CannedHttpClient::ok(r#"{"Note": "API call frequency exceeded."}"#);
    let model = ScriptedModel::replying("never used");
    let assistant = assistant_with(http, model.clone());

    // When: the user asks for an insight
    let outcome = assistant.run("AAPL").await;

    // Then: the generic error shows and the model was never contacted
    assert!(matches!(outcome.error(), Some(AssistantError::MarketData(_))));
    assert!(model.requests().is_empty());
    let text = Report::from_outcome(&outcome).to_text();
    assert!(text.contains("Something went wrong fetching data or generating insights."));
    assert!(text.contains("API call frequency exceeded."));
    assert!(!text.contains("is currently"));
}

#[tokio::test]
async fn transport_failure_reaches_error_path_without_model_call() {
    let http = CannedHttpClient::returning(Err(HttpError::new("connection failed: refused")));
    let model = ScriptedModel::replying("never used");
    let assistant = assistant_with(http, model.clone());

    let outcome = assistant.run("AAPL").await;

    assert!(!outcome.is_success());
    assert!(model.requests().is_empty());
}

#[tokio::test]
async fn model_failure_shows_price_but_no_insight() {
    // Given: a good quote but a failing model
    let http = CannedHttpClient::ok(intraday_body("AAPL", &[("2024-01-01 10:00:00", "150.25")]));
    let model = ScriptedModel::failing(ModelError::provider("You exceeded your current quota"));
    let assistant = assistant_with(http, model);

    // When
    let outcome = assistant.run("AAPL").await;

    // Then: the error path is reached, no insight text is shown
    match outcome.error() {
        Some(AssistantError::Insight(error)) => assert_eq!(error.kind(), ModelErrorKind::Provider),
        other => panic!("expected insight error, got {other:?}"),
    }
    let text = Report::from_outcome(&outcome).to_text();
    assert!(text.contains("AAPL is currently $150.25"));
    assert!(text.contains("You exceeded your current quota"));
    assert!(!text.contains("AI Trading Insight"));
}

#[tokio::test]
async fn blank_input_calls_neither_provider() {
    let http = CannedHttpClient::ok(intraday_body("AAPL", &[("2024-01-01 10:00:00", "1.00")]));
    let model = ScriptedModel::replying("never used");
    let assistant = assistant_with(http.clone(), model.clone());

    let outcome = assistant.run("  ").await;

    assert!(matches!(outcome.error(), Some(AssistantError::InvalidSymbol(_))));
    assert!(http.requests().is_empty());
    assert!(model.requests().is_empty());
}

// =============================================================================
// Statelessness
// =============================================================================

#[tokio::test]
async fn repeating_the_same_symbol_calls_both_providers_again() {
    let http = CannedHttpClient::ok(intraday_body("AAPL", &[("2024-01-01 10:00:00", "150.25")]));
    let model = ScriptedModel::replying("Hold");
    let assistant = assistant_with(http.clone(), model.clone());

    let first = assistant.run("AAPL").await;
    let second = assistant.run("AAPL").await;

    assert_eq!(first, second);
    assert_eq!(http.requests().len(), 2);
    assert_eq!(model.requests().len(), 2);
}

#[tokio::test]
async fn json_view_of_success_has_quote_and_reply() {
    let http = CannedHttpClient::ok(intraday_body("NVDA", &[("2024-06-03 11:15:00", "1150.00")]));
    let model = ScriptedModel::replying("Sell: extended after the run-up.");
    let assistant = assistant_with(http, model);

    let outcome = assistant.run("nvda").await;
    let json = serde_json::to_value(OutcomeView::from(&outcome)).expect("serialize");

    assert_eq!(json["status"], "ok");
    assert_eq!(json["symbol"], "NVDA");
    assert_eq!(json["price"], "1150.00");
    assert_eq!(json["as_of"], "2024-06-03 11:15:00");
    assert_eq!(json["time_zone"], "US/Eastern");
    assert_eq!(json["insight"], "Sell: extended after the run-up.");
}
