/// Integration tests for the prediction pipeline
///
/// Run with: cargo test --test pipeline_tests -- --nocapture
use signal_predictor::encoder::LabelEncoder;
use signal_predictor::error::PredictError;
use signal_predictor::model::Forest;
use signal_predictor::pipeline;
use signal_predictor::presenter;
use signal_predictor::types::{Observation, PredictRequest};

fn demo_forest() -> Forest {
    Forest::from_json(include_str!("../artifacts/model.json")).expect("demo model should load")
}

fn demo_encoder() -> LabelEncoder {
    LabelEncoder::from_json(include_str!("../artifacts/encoder.json"))
        .expect("demo encoder should load")
}

fn obs(weather: &str, latency_ms: f64, users_online: u32) -> Observation {
    Observation {
        latitude: 52.37,
        longitude: 4.90,
        weather_condition: weather.to_string(),
        latency_ms,
        users_online,
    }
}

#[test]
fn test_range_invariant_over_grid() {
    println!("\n=== Test: Signal Range Invariant ===");
    let forest = demo_forest();
    let encoder = demo_encoder();

    let latencies = [0.0, 1.0, 79.9, 80.0, 120.0, 500.0, 1.0e6, 1.0e12];
    let user_counts = [0u32, 1, 150, 151, 10_000, 1_000_000];

    let mut checked = 0;
    for class in encoder.classes().to_vec() {
        for &latency in &latencies {
            for &users in &user_counts {
                let result =
                    pipeline::predict_observation(&forest, &encoder, &obs(&class, latency, users))
                        .expect("in-vocabulary observation must predict");
                assert!(
                    result.signal_strength.is_finite(),
                    "non-finite signal for weather={} latency={} users={}",
                    class,
                    latency,
                    users
                );
                assert!(
                    (0.0..=100.0).contains(&result.signal_strength),
                    "signal {} out of range for weather={} latency={} users={}",
                    result.signal_strength,
                    class,
                    latency,
                    users
                );
                checked += 1;
            }
        }
    }
    println!("✓ {} grid points all within [0,100]", checked);
}

#[test]
fn test_determinism() {
    println!("\n=== Test: Determinism ===");
    let forest = demo_forest();
    let encoder = demo_encoder();

    let o = obs("Rain", 143.7, 892);
    let first = pipeline::predict_observation(&forest, &encoder, &o).unwrap();
    for _ in 0..100 {
        let again = pipeline::predict_observation(&forest, &encoder, &o).unwrap();
        assert_eq!(
            first.signal_strength.to_bits(),
            again.signal_strength.to_bits(),
            "identical inputs must produce identical outputs"
        );
    }
    println!("✓ 100 repeats bit-identical: {}", first.signal_strength);
}

#[test]
fn test_known_fixture_predictions() {
    println!("\n=== Test: Known Fixture Predictions ===");
    let forest = demo_forest();
    let encoder = demo_encoder();

    // Clear sky, low latency, few users: leaves 85, 80, 75 -> mean 80
    let good = pipeline::predict_observation(&forest, &encoder, &obs("Clear", 50.0, 100)).unwrap();
    assert!((good.signal_strength - 80.0).abs() < 1e-4);

    // Thunderstorm, high latency, crowded: leaves 30, 35, 40 -> mean 35
    let bad =
        pipeline::predict_observation(&forest, &encoder, &obs("Thunderstorm", 300.0, 500)).unwrap();
    assert!((bad.signal_strength - 35.0).abs() < 1e-4);

    assert!(good.signal_strength > bad.signal_strength);
    println!(
        "✓ good={} bad={}",
        good.signal_strength, bad.signal_strength
    );
}

#[test]
fn test_unknown_weather_rejected() {
    println!("\n=== Test: Unknown Weather Rejection ===");
    let forest = demo_forest();
    let encoder = demo_encoder();

    let err = pipeline::predict_observation(&forest, &encoder, &obs("Sandstorm", 50.0, 10))
        .expect_err("category outside the training vocabulary must be rejected");

    match err {
        PredictError::UnknownWeather { label, known } => {
            assert_eq!(label, "Sandstorm");
            assert!(known.contains(&"Clear".to_string()));
            println!("✓ rejected with vocabulary of {} classes", known.len());
        }
        other => panic!("expected UnknownWeather, got {:?}", other),
    }
}

#[test]
fn test_boundary_inputs() {
    println!("\n=== Test: Boundary Inputs ===");
    let forest = demo_forest();
    let encoder = demo_encoder();

    // Extremes must not panic the encoder or predictor, and must stay in range.
    let extremes = [
        obs("Clear", 0.0, 0),
        obs("Snow", f64::MAX, u32::MAX),
        obs("Fog", 0.0, u32::MAX),
        obs("Drizzle", f64::MAX, 0),
    ];
    for o in &extremes {
        let result = pipeline::predict_observation(&forest, &encoder, o).unwrap();
        assert!((0.0..=100.0).contains(&result.signal_strength));
    }
    println!("✓ extreme latency/user-count values handled");
}

#[test]
fn test_manual_entry_path() {
    println!("\n=== Test: Manual Entry Path ===");
    // The fallback contract: a fully manual observation (no weather fetch,
    // no geolocation beyond caller-supplied coordinates) still predicts.
    let forest = demo_forest();
    let encoder = demo_encoder();

    let manual = Observation {
        latitude: 0.0,
        longitude: 0.0,
        weather_condition: "Clouds".to_string(),
        latency_ms: 95.0,
        users_online: 42,
    };
    let result = pipeline::predict_observation(&forest, &encoder, &manual).unwrap();
    assert!((0.0..=100.0).contains(&result.signal_strength));
    println!("✓ manual observation predicted: {}", result.signal_strength);
}

#[test]
fn test_encoder_codes() {
    println!("\n=== Test: Encoder Codes ===");
    let encoder = demo_encoder();

    // Codes are the table index, identical to the training-time encoding.
    assert_eq!(encoder.encode("Clear").unwrap(), 0);
    assert_eq!(encoder.encode("Clouds").unwrap(), 1);
    assert_eq!(encoder.encode("Thunderstorm").unwrap(), 6);

    // Whitespace is trimmed, but matching is otherwise exact.
    assert_eq!(encoder.encode("  Rain ").unwrap(), 4);
    assert!(encoder.encode("rain").is_err());

    assert!(LabelEncoder::new(vec![]).is_err(), "empty table must be rejected");
    println!("✓ encoder table behaves like the fitted one");
}

#[test]
fn test_feature_length_mismatch() {
    println!("\n=== Test: Feature Length Mismatch ===");
    let forest = demo_forest();

    let err = forest.predict(&[1.0, 2.0]).expect_err("wrong arity must fail");
    match err {
        PredictError::FeatureLengthMismatch { got, expected } => {
            assert_eq!(got, 2);
            assert_eq!(expected, 3);
        }
        other => panic!("expected FeatureLengthMismatch, got {:?}", other),
    }
    println!("✓ arity checked before any tree walk");
}

#[test]
fn test_malformed_model_rejected() {
    println!("\n=== Test: Malformed Model Rejection ===");

    // No trees at all.
    assert!(Forest::from_json(r#"{ "n_features": 3, "trees": [] }"#).is_err());

    // Child index out of bounds.
    let dangling = r#"{
        "n_features": 3,
        "trees": [{
            "feature": [0],
            "threshold": [1.0],
            "children_left": [5],
            "children_right": [6],
            "value": [0.0]
        }]
    }"#;
    assert!(Forest::from_json(dangling).is_err());

    // Split on a feature the model does not have.
    let bad_feature = r#"{
        "n_features": 3,
        "trees": [{
            "feature": [7, -1, -1],
            "threshold": [1.0, 0.0, 0.0],
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "value": [0.0, 1.0, 2.0]
        }]
    }"#;
    assert!(Forest::from_json(bad_feature).is_err());

    // Node arrays of disagreeing lengths.
    let ragged = r#"{
        "n_features": 3,
        "trees": [{
            "feature": [-1],
            "threshold": [0.0],
            "children_left": [-1, -1],
            "children_right": [-1],
            "value": [10.0]
        }]
    }"#;
    assert!(Forest::from_json(ragged).is_err());

    println!("✓ malformed artifacts fail at load time");
}

#[test]
fn test_presenter_bands() {
    println!("\n=== Test: Presenter Bands ===");
    assert_eq!(presenter::present(100.0).0, "EXCELLENT");
    assert_eq!(presenter::present(75.0).0, "EXCELLENT");
    assert_eq!(presenter::present(74.9).0, "GOOD");
    assert_eq!(presenter::present(50.0).0, "GOOD");
    assert_eq!(presenter::present(49.9).0, "FAIR");
    assert_eq!(presenter::present(25.0).0, "FAIR");
    assert_eq!(presenter::present(24.9).0, "POOR");
    assert_eq!(presenter::present(0.0).0, "POOR");

    let line = presenter::summary_line("Rain", 143.7, 892, 61.25, "GOOD");
    assert!(line.contains("QUALITY=GOOD"));
    assert!(line.contains("weather=Rain"));
    println!("✓ band ladder and summary line correct");
}

#[test]
fn test_request_json_shapes() {
    println!("\n=== Test: Request JSON Shapes ===");

    // Automatic path: no weather_condition, service must fetch it.
    let auto: PredictRequest = serde_json::from_str(
        r#"{ "latitude": 52.37, "longitude": 4.9, "latency_ms": 88.5, "users_online": 340 }"#,
    )
    .expect("automatic-path request should parse");
    assert!(auto.weather_condition.is_none());

    // Manual override carries the condition inline.
    let manual: PredictRequest = serde_json::from_str(
        r#"{
            "latitude": 52.37,
            "longitude": 4.9,
            "latency_ms": 88.5,
            "users_online": 340,
            "weather_condition": "Snow"
        }"#,
    )
    .expect("manual-path request should parse");
    assert_eq!(manual.weather_condition.as_deref(), Some("Snow"));

    println!("✓ both request shapes parse");
}
