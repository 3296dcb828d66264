//! YAML configuration round-trips through serde.

use qrogue_gen::{
    DifficultyProfile, DimensionValue, GeneratorConfig, PuzzleDifficulty, Strategy,
};

#[test]
fn test_generator_config_defaults() {
    let config: GeneratorConfig = serde_yaml_ng::from_str("{}").unwrap();
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.strategy(), Strategy::Nearsighted);
    assert!((config.comparison.tolerance - 0.1).abs() < 1e-12);
    assert!(!config.comparison.force_equal);
}

#[test]
fn test_generator_config_overrides() {
    let yaml = r#"
comparison:
  tolerance: 0.05
max_retries: 1
force_num_of_gates: true
"#;
    let config: GeneratorConfig = serde_yaml_ng::from_str(yaml).unwrap();
    assert_eq!(config.max_retries, 1);
    assert_eq!(config.strategy(), Strategy::Farsighted);
    assert!((config.comparison.tolerance - 0.05).abs() < 1e-12);
    assert!(config.validate().is_ok());
}

#[test]
fn test_difficulty_absolute_and_relative() {
    let yaml = r#"
circuit_length: 0.8
rotated_qubits: 2
second_rotations: 1
randomization_degree: 0
"#;
    let difficulty: PuzzleDifficulty = serde_yaml_ng::from_str(yaml).unwrap();
    assert_eq!(difficulty.circuit_length, DimensionValue::Relative(0.8));
    assert_eq!(difficulty.rotated_qubits, DimensionValue::Absolute(2));
    assert_eq!(difficulty.bonus_edits, DimensionValue::Absolute(0));

    let resolved = difficulty.resolve(3, 5);
    assert_eq!(resolved.circuit_length, 4);
    assert_eq!(resolved.rotated_qubits, 2);
    assert_eq!(resolved.second_rotations, 1);
    assert_eq!(resolved.randomization_degree, 0);
}

#[test]
fn test_difficulty_requires_core_dimensions() {
    assert!(serde_yaml_ng::from_str::<PuzzleDifficulty>("rotated_qubits: 1").is_err());
}
