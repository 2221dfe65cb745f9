//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [shift]
        min_hours = 3
        max_hours = 8
        max_hours_policy = "reject"

        [termination]
        seconds_spent_limit = 30
        node_count_limit = 1000000

        [search]
        strategy = "exhaustive"
        exhaustive_search_limit = 5000
        thread_count = { count = 4 }
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.shift.min_hours, 3);
    assert_eq!(config.shift.max_hours, 8);
    assert_eq!(config.shift.max_hours_policy, MaxHoursPolicyConfig::Reject);
    assert_eq!(config.time_limit(), Duration::from_secs(30));
    assert_eq!(config.node_count_limit(), Some(1_000_000));
    assert_eq!(config.search.strategy, SearchStrategy::Exhaustive);
    assert_eq!(config.search.exhaustive_search_limit, 5000);
    assert_eq!(config.search.thread_count, ThreadCount::Count(4));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        shift:
          min_hours: 4
          max_hours: 10
        termination:
          millis_spent_limit: 500
        search:
          strategy: branch_and_bound
          thread_count: none
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.shift, ShiftConfig::default());
    assert_eq!(config.time_limit(), Duration::from_millis(500));
    assert_eq!(config.search.strategy, SearchStrategy::BranchAndBound);
    assert_eq!(config.search.thread_count, ThreadCount::None);
}

#[test]
fn test_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
    assert_eq!(config.shift.min_hours, 4);
    assert_eq!(config.shift.max_hours, 10);
    assert_eq!(config.shift.max_hours_policy, MaxHoursPolicyConfig::Clamp);
    assert_eq!(config.time_limit(), Duration::from_secs(DEFAULT_TIME_LIMIT_SECS));
    assert_eq!(config.node_count_limit(), None);
    assert_eq!(config.search.strategy, SearchStrategy::Auto);
    assert_eq!(
        config.search.exhaustive_search_limit,
        DEFAULT_EXHAUSTIVE_SEARCH_LIMIT
    );
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_shift_hours(2, 6)
        .with_termination_seconds(60)
        .with_strategy(SearchStrategy::BranchAndBound)
        .with_thread_count(ThreadCount::Count(2));

    assert_eq!(config.shift.min_hours, 2);
    assert_eq!(config.shift.max_hours, 6);
    assert_eq!(config.time_limit(), Duration::from_secs(60));
    assert_eq!(config.search.thread_count, ThreadCount::Count(2));

    let config = config.with_time_limit(Duration::from_millis(1500));
    assert_eq!(config.time_limit(), Duration::from_millis(1500));
}

#[test]
fn test_invalid_values_rejected() {
    let err = SolverConfig::from_toml_str(
        r#"
        [shift]
        min_hours = 6
        max_hours = 4
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = SolverConfig::from_toml_str(
        r#"
        [shift]
        min_hours = 0
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = SolverConfig::from_toml_str(
        r#"
        [search]
        thread_count = { count = 0 }
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = SolverConfig::from_toml_str("shift = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file() {
    let err = SolverConfig::load("does/not/exist.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert_eq!(
        SolverConfig::load("does/not/exist.toml").unwrap_or_default(),
        SolverConfig::default()
    );
}

#[test]
fn test_huge_time_limit_saturates() {
    let config = SolverConfig::from_toml_str(&format!(
        r#"
        [termination]
        seconds_spent_limit = {}
        millis_spent_limit = 500
    "#,
        i64::MAX
    ))
    .unwrap();
    assert_eq!(config.time_limit(), Duration::from_millis(u64::MAX));
}

#[test]
fn test_thread_count_resolution() {
    assert_eq!(ThreadCount::Auto.resolve(8), 8);
    assert_eq!(ThreadCount::Auto.resolve(0), 1);
    assert_eq!(ThreadCount::None.resolve(8), 1);
    assert_eq!(ThreadCount::Count(3).resolve(8), 3);
}

#[test]
fn test_policy_conversion() {
    assert_eq!(
        MaxHoursPolicy::from(MaxHoursPolicyConfig::Clamp),
        MaxHoursPolicy::Clamp
    );
    assert_eq!(
        MaxHoursPolicy::from(MaxHoursPolicyConfig::Reject),
        MaxHoursPolicy::Reject
    );
}
