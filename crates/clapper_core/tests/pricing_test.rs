use clapper_core::{LlmPricing, Resolution, VideoPricing, parse_numbered_list, round_cost};

#[test]
fn test_video_estimate_by_resolution() {
    let pricing = VideoPricing::default();
    assert_eq!(pricing.estimate(Resolution::P720, 8), 0.3);
    assert_eq!(pricing.estimate(Resolution::P1080, 8), 0.6);
    assert_eq!(pricing.estimate(Resolution::P4k, 10), 1.5);
}

#[test]
fn test_video_pricing_from_yaml_like_json() {
    let pricing: VideoPricing = serde_json::from_str(r#"{"720p": 0.5}"#).unwrap();
    assert_eq!(pricing.rate(Resolution::P720), 0.5);
    assert_eq!(pricing.rate(Resolution::P1080), 0.075);
}

#[test]
fn test_llm_cost_rounds_to_six_decimals() {
    let pricing = LlmPricing::default();
    let cost = pricing.cost("gpt-4o-mini", 1234, 567);
    assert_eq!(cost.input, 0.000185);
    assert_eq!(cost.output, 0.00034);
    assert_eq!(cost.total, round_cost(cost.input + cost.output));
}

#[test]
fn test_llm_cost_gpt4o() {
    let cost = LlmPricing::default().cost("gpt-4o", 2_000_000, 1_000_000);
    assert_eq!(cost.input, 5.0);
    assert_eq!(cost.output, 10.0);
    assert_eq!(cost.total, 15.0);
}

#[test]
fn test_resolution_parsing() {
    assert_eq!("4K".parse::<Resolution>().unwrap(), Resolution::P4k);
    assert_eq!("720p".parse::<Resolution>().unwrap(), Resolution::P720);
    assert!("480p".parse::<Resolution>().is_err());
    assert_eq!(
        serde_json::to_string(&Resolution::P1080).unwrap(),
        "\"1080p\""
    );
}

#[test]
fn test_parse_numbered_list_skips_prose() {
    let text = "Sure! Here are three:\n\n1. First idea\n2. Second idea\n10) Tenth idea\n-\nClosing remark";
    assert_eq!(
        parse_numbered_list(text),
        vec!["First idea", "Second idea", "Tenth idea"]
    );
}
