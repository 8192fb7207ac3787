//! Integration tests for gammascript

use gammascript::prelude::*;

/// Helper: buy on an uptick, then take profit at 20% and stop out on a trend flip
fn create_test_strategy() -> Strategy {
    let buy = Rule::new(1)
        .with_conditions(vec![Condition::compare(
            1,
            "currentPrice",
            Operator::Gt,
            RightOperand::variable("prevPrice"),
        )])
        .with_actions(vec![Action::new(1, ActionKind::Buy)]);

    let sell = Rule::new(2)
        .set_phase(Phase::Sell)
        .with_conditions(vec![
            Condition::compare(
                1,
                "currentPrice",
                Operator::Gt,
                RightOperand::scaled("initBuyPrice", "1.2"),
            ),
            Condition::compare(2, "cma", Operator::Lt, RightOperand::variable("lma")),
        ])
        .with_actions(vec![
            Action::new(1, ActionKind::SellAll),
            Action::new(2, ActionKind::Deactivate),
        ]);

    Strategy::from_rules(vec![buy, sell]).unwrap()
}

#[test]
fn test_scenario_buy_rule() {
    let strategy = create_test_strategy();
    let rule = &strategy.rules()[0];
    assert_eq!(
        encode_condition(rule, false),
        "buyCount == 0 && currentPrice > prevPrice"
    );
    assert_eq!(encode_actions(rule), vec!["buy"]);
}

#[test]
fn test_scenario_sell_rule() {
    let strategy = create_test_strategy();
    let rule = &strategy.rules()[1];
    assert_eq!(
        encode_condition(rule, false),
        "buyCount > 0 && currentPrice > initBuyPrice * 1.2 && cma < lma"
    );
    assert_eq!(encode_actions(rule), vec!["sell all", "deact"]);
}

#[test]
fn test_scenario_two_rule_raw() {
    let raw = to_raw(&create_test_strategy()).unwrap();
    let parsed = parse_raw(&raw).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].condition, "buyCount == 0 && currentPrice > prevPrice");
    assert_eq!(parsed[1].actions, vec!["sell all", "deact"]);
}

#[test]
fn test_empty_condition_is_dropped() {
    let strategy = create_test_strategy()
        .update_rule(1, |r| Ok(r.add_condition()))
        .unwrap();
    assert_eq!(strategy.rules()[0].conditions.len(), 2);
    assert_eq!(
        encode_condition(&strategy.rules()[0], false),
        "buyCount == 0 && currentPrice > prevPrice"
    );
    assert!(is_strategy_valid(&strategy));
}

#[test]
fn test_readable_rendering() {
    let readable = to_readable(&create_test_strategy());
    let expected = "1  c: buyCount == 0 && currentPrice > prevPrice\n    a: buy\n\n\
                    2  c: buyCount > 0 && currentPrice > initBuyPrice * 1.2 && cma < lma\n    a: sell all, deact";
    assert_eq!(readable, expected);
}

#[test]
fn test_clone_round_trip() {
    let original = create_test_strategy();
    let raw = to_raw(&original).unwrap();

    let cloned = Strategy::from_raw(&raw).unwrap();
    assert_eq!(cloned, original);
    assert_eq!(to_raw(&cloned).unwrap(), raw);
}

#[test]
fn test_compact_round_trip() {
    let original = create_test_strategy();
    let compact = to_compact(&original).unwrap();
    assert!(compact.contains("bcn > 0 && cpr > ibp * 1.2 && cma < lma"));

    let cloned = Strategy::from_raw(&compact).unwrap();
    assert_eq!(to_raw(&cloned).unwrap(), to_raw(&original).unwrap());
}

#[test]
fn test_clone_of_hand_typed_text_falls_back() {
    let text = r#"[{"c": "buyCount == 0 && (cma > lma || mom > 0)", "a": ["buy"]}]"#;

    // still readable as opaque entries
    let parsed = parse_raw(text).unwrap();
    assert_eq!(parsed[0].condition, "buyCount == 0 && (cma > lma || mom > 0)");

    // but not as an editable strategy
    assert!(matches!(
        Strategy::from_raw(text),
        Err(ParseError::InvalidClause { rule: 1, .. })
    ));
}

#[test]
fn test_builder_session() {
    let strategy = Strategy::new()
        .update_rule(1, |r| {
            r.add_condition()
                .update_condition(1, ConditionUpdate::Left("currentPrice".into()))?
                .update_condition(1, ConditionUpdate::Operator(Operator::Lt))?
                .update_condition(1, ConditionUpdate::RightValue("rollingLow".into()))?
                .update_condition(1, ConditionUpdate::Multiplier("1.0".into()))?
                .update_action(1, Some(ActionKind::Buy))
        })
        .unwrap()
        .add_rule()
        .update_rule(2, |r| {
            r.set_phase(Phase::Sell)
                .add_action()?
                .update_action(1, Some(ActionKind::Sell("0.5".into())))?
                .update_action(2, Some(ActionKind::Reset))
        })
        .unwrap();

    assert!(is_strategy_valid(&strategy));
    assert!(validate(&strategy).is_empty());

    let raw = submission(&strategy, &Limits::default()).unwrap();
    assert_eq!(
        raw,
        r#"[
  {
    "c": "buyCount == 0 && currentPrice < rollingLow",
    "a": [
      "buy"
    ]
  },
  {
    "c": "buyCount > 0",
    "a": [
      "sell 0.5",
      "reset"
    ]
  }
]"#
    );
}

#[test]
fn test_buy_phase_refuses_sell_actions() {
    let strategy = Strategy::new();
    let err = strategy
        .update_rule(1, |r| r.update_action(1, Some(ActionKind::Sell("0.5".into()))))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "action 'sell' is not allowed in the buy phase"
    );
}

#[test]
fn test_submission_rejects_oversized_strategy() {
    let mut strategy = create_test_strategy();
    while to_raw(&strategy).unwrap().chars().count() <= MAX_RAW_LEN {
        strategy = strategy.add_rule();
        let id = strategy.rules().last().unwrap().id;
        strategy = strategy
            .update_rule(id, |r| r.update_action(1, Some(ActionKind::Skip)))
            .unwrap();
    }
    assert!(is_strategy_valid(&strategy));
    assert!(matches!(
        submission(&strategy, &Limits::default()),
        Err(SubmitError::TooLong { max: MAX_RAW_LEN, .. })
    ));
}
