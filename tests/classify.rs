use mathmentor::classify::{DEFAULT_TOPIC, TOPIC_RULES};
use mathmentor::route::STRATEGY_TABLE;
use mathmentor::{Strategy, Topic, classify, parse_problem, route, route_problem};

#[test]
fn keywords_select_topics() {
    let cases = [
        ("Find the derivative of x^2", Topic::Calculus),
        ("What is the LIMIT of 1/x", Topic::Calculus),
        ("Maximize the area", Topic::Calculus),
        ("minimize x^2 + 1", Topic::Calculus),
        ("Probability of rolling a 6", Topic::Probability),
        ("Roll two dice", Topic::Probability),
        ("A coin is tossed 3 times", Topic::Probability),
        ("Find the determinant of [1,2],[3,4]", Topic::LinearAlgebra),
        ("Invert this Matrix", Topic::LinearAlgebra),
        ("solve x + 2 = 5", Topic::Algebra),
        ("", Topic::Algebra),
    ];
    for (text, expected) in cases {
        assert_eq!(classify(text), expected, "classifying {text:?}");
    }
}

#[test]
fn earlier_rules_win() {
    assert_eq!(classify("probability that the limit exists"), Topic::Calculus);
    assert_eq!(classify("coin placed on a matrix"), Topic::Probability);
    assert_eq!(DEFAULT_TOPIC, Topic::Algebra);
}

#[test]
fn every_rule_keyword_maps_to_its_topic() {
    for rule in TOPIC_RULES {
        for keyword in rule.keywords {
            let text = format!("please handle this {}", keyword.to_uppercase());
            assert_eq!(classify(&text), rule.topic, "keyword {keyword}");
        }
    }
}

#[test]
fn parse_problem_trims_and_keeps_case() {
    let parsed = parse_problem("  Solve X + 1 = 2 \n");
    assert_eq!(parsed.problem_text, "Solve X + 1 = 2");
    assert_eq!(parsed.topic, Topic::Algebra);
}

#[test]
fn routing_is_total() {
    for topic in Topic::ALL {
        let strategy = route(topic);
        assert_ne!(strategy, Strategy::General, "{topic} has no strategy");
        assert!(STRATEGY_TABLE.contains(&(topic, strategy)));
    }
    assert_eq!(route(Topic::Algebra), Strategy::SymbolicSolve);
    assert_eq!(route(Topic::Calculus), Strategy::DifferentiateOrLimit);
    assert_eq!(route(Topic::Probability), Strategy::CountingProbability);
    assert_eq!(route(Topic::LinearAlgebra), Strategy::MatrixOperations);
}

#[test]
fn route_decision_carries_topic() {
    let decision = route_problem(&parse_problem("coin tossed 2 times"));
    assert_eq!(decision.topic, Topic::Probability);
    assert_eq!(decision.strategy, Strategy::CountingProbability);
}

#[test]
fn records_serialize_as_snake_case() {
    let decision = route_problem(&parse_problem("determinant of [1]"));
    let json = serde_json::to_value(decision).expect("serialize decision");
    assert_eq!(json["topic"], "linear_algebra");
    assert_eq!(json["strategy"], "matrix_operations");
}
