//! End-to-end generation scenarios.

use qrogue_adapter_sim::StatevectorBackend;
use qrogue_gen::{
    DifficultyLevel, GenError, GeneratorConfig, PuzzleDifficulty, PuzzleGenerator,
    ReachabilitySearch, WeightedPool,
};
use qrogue_hal::CircuitRunner;
use qrogue_ir::{CombinationRules, GateKind, PlacedGate, QubitId};
use qrogue_state::ComparisonConfig;

fn scenario_pool() -> Vec<GateKind> {
    vec![GateKind::H, GateKind::X, GateKind::CX, GateKind::S, GateKind::Y]
}

fn farsighted() -> GeneratorConfig {
    GeneratorConfig {
        force_num_of_gates: true,
        ..GeneratorConfig::default()
    }
}

#[test]
fn test_two_qubit_scenario_seed_zero() {
    let backend = StatevectorBackend::new();
    let generator = PuzzleGenerator::new(
        &backend,
        2,
        5,
        PuzzleDifficulty::with_length(4),
        scenario_pool(),
        (),
    )
    .unwrap();
    let puzzle = generator.generate_puzzle(0).unwrap();

    match puzzle.shortfall {
        None => assert_eq!(puzzle.target_gates.len(), 4),
        Some(shortfall) => {
            assert_eq!(shortfall.requested, 4);
            assert_eq!(shortfall.placed, puzzle.target_gates.len());
            assert!(shortfall.placed < 4);
        }
    }

    let comparison = ComparisonConfig::default();
    let witness = ReachabilitySearch::new(&backend, 2)
        .with_comparison(comparison)
        .find(&puzzle.input, &puzzle.target, &puzzle.target_gate_kinds())
        .unwrap()
        .expect("generated puzzle must be reachable");
    assert!(witness.vector.is_equal_to(&puzzle.target, &comparison, true).unwrap());

    let runner = CircuitRunner::new(&backend, 2);
    let replay = runner
        .run_vector(puzzle.input_gates.iter().chain(&witness.gates))
        .unwrap();
    assert!(replay.is_equal_to(&puzzle.target, &comparison, true).unwrap());
}

#[test]
fn test_solution_reproduces_target() {
    let backend = StatevectorBackend::new();
    for config in [GeneratorConfig::default(), farsighted()] {
        let generator = PuzzleGenerator::new(
            &backend,
            3,
            4,
            PuzzleDifficulty::preset(DifficultyLevel::Hard),
            vec![GateKind::H, GateKind::CX, GateKind::Swap, GateKind::Rz(0.7)],
            (),
        )
        .unwrap()
        .with_config(config)
        .unwrap();
        for seed in 0..5 {
            let puzzle = generator.generate_puzzle(seed).unwrap();
            let runner = CircuitRunner::new(&backend, 3);
            let input = runner.run_vector(&puzzle.input_gates).unwrap();
            let target = runner
                .run_vector(puzzle.input_gates.iter().chain(&puzzle.target_gates))
                .unwrap();
            let exact = ComparisonConfig::with_tolerance(1e-9);
            assert!(input.is_equal_to(&puzzle.input, &exact, true).unwrap());
            assert!(target.is_equal_to(&puzzle.target, &exact, true).unwrap());
        }
    }
}

#[test]
fn test_same_seed_same_puzzle() {
    let backend = StatevectorBackend::new();
    let rewards = WeightedPool::new([("coins", 3.0), ("key", 1.0), ("heart", 1.0)]).unwrap();
    let build = |config: GeneratorConfig| {
        PuzzleGenerator::new(
            &backend,
            2,
            5,
            PuzzleDifficulty::preset(DifficultyLevel::Medium),
            scenario_pool(),
            rewards.clone(),
        )
        .unwrap()
        .with_config(config)
        .unwrap()
    };

    for config in [GeneratorConfig::default(), farsighted()] {
        let a = build(config.clone()).generate_puzzle(1234).unwrap();
        let b = build(config).generate_puzzle(1234).unwrap();
        assert_eq!(a.input, b.input);
        assert_eq!(a.target, b.target);
        assert_eq!(a.input_gates, b.input_gates);
        assert_eq!(a.target_gates, b.target_gates);
        assert_eq!(a.reward, b.reward);
        assert_eq!(a.shortfall, b.shortfall);
    }
}

#[test]
fn test_too_many_gates_is_a_shortfall() {
    let backend = StatevectorBackend::new();
    for config in [GeneratorConfig::default(), farsighted()] {
        let generator = PuzzleGenerator::new(
            &backend,
            1,
            2,
            PuzzleDifficulty::with_length(5),
            vec![GateKind::X, GateKind::H],
            (),
        )
        .unwrap()
        .with_config(config)
        .unwrap();
        let puzzle = generator.generate_puzzle(9).unwrap();
        let shortfall = puzzle.shortfall.expect("two slots cannot hold five gates");
        assert_eq!(shortfall.requested, 5);
        assert!(shortfall.placed <= 2);
        assert_eq!(shortfall.placed, puzzle.target_gates.len());
        assert!(!puzzle.is_complete());
    }
}

#[test]
fn test_two_qubit_gates_respect_grid() {
    let backend = StatevectorBackend::new();
    let generator = PuzzleGenerator::new(
        &backend,
        2,
        2,
        PuzzleDifficulty::with_length(10),
        vec![GateKind::CX, GateKind::H],
        (),
    )
    .unwrap()
    .with_config(farsighted())
    .unwrap();
    let puzzle = generator.generate_puzzle(3).unwrap();
    assert!(puzzle.target_gates.len() <= 4);
    assert!(puzzle.shortfall.is_some());

    for q in 0..2u32 {
        let uses = puzzle
            .target_gates
            .iter()
            .filter(|g| g.qargs().contains(&QubitId(q)))
            .count();
        assert!(uses <= 2);
    }
}

#[test]
fn test_nearsighted_never_revisits_a_state() {
    let backend = StatevectorBackend::new();
    let generator = PuzzleGenerator::new(
        &backend,
        2,
        5,
        PuzzleDifficulty::with_length(5),
        scenario_pool(),
        (),
    )
    .unwrap();
    let runner = CircuitRunner::new(&backend, 2);
    let comparison = ComparisonConfig::default();

    for seed in 0..5 {
        let puzzle = generator.generate_puzzle(seed).unwrap();
        let mut states = vec![puzzle.input.clone()];
        for n in 1..=puzzle.target_gates.len() {
            let state = runner.run_vector(&puzzle.target_gates[..n]).unwrap();
            for earlier in &states {
                assert!(!state.is_equal_to(earlier, &comparison, true).unwrap());
            }
            states.push(state);
        }
    }
}

#[test]
fn test_farsighted_never_undoes_previous_gate() {
    let backend = StatevectorBackend::new();
    let generator = PuzzleGenerator::new(
        &backend,
        1,
        6,
        PuzzleDifficulty::with_length(6),
        vec![GateKind::X, GateKind::H],
        (),
    )
    .unwrap()
    .with_config(farsighted())
    .unwrap();
    for seed in 0..10 {
        let puzzle = generator.generate_puzzle(seed).unwrap();
        assert!(!puzzle.target_gates.is_empty());
        for pair in puzzle.target_gates.windows(2) {
            assert!(!pair[1].cancels(&pair[0]));
        }
    }
}

#[test]
fn test_configuration_errors() {
    let backend = StatevectorBackend::new();
    let difficulty = PuzzleDifficulty::default();

    let err = PuzzleGenerator::new(&backend, 2, 5, difficulty, vec![], ()).err();
    assert!(matches!(err, Some(GenError::EmptyGatePool)));

    let err = PuzzleGenerator::new(&backend, 1, 5, difficulty, vec![GateKind::H, GateKind::CX], ()).err();
    assert!(matches!(
        err,
        Some(GenError::ArityMismatch { arity: 2, num_qubits: 1, .. })
    ));

    let err = PuzzleGenerator::new(&backend, 0, 5, difficulty, vec![GateKind::H], ()).err();
    assert!(matches!(err, Some(GenError::InvalidConfig(_))));

    let err = PuzzleGenerator::new(&backend, 2, 0, difficulty, vec![GateKind::H], ()).err();
    assert!(matches!(err, Some(GenError::InvalidConfig(_))));

    let sub_gates = vec![
        PlacedGate::bound(GateKind::H, [QubitId(0)]).unwrap(),
        PlacedGate::bound(GateKind::X, [QubitId(0)]).unwrap(),
    ];
    let combined = qrogue_hal::combine(&backend, "HX", &sub_gates, 1, &CombinationRules::default())
        .unwrap()
        .gate
        .kind()
        .clone();
    let err = PuzzleGenerator::new(&backend, 2, 5, difficulty, vec![combined], ()).err();
    assert!(matches!(err, Some(GenError::InvalidConfig(_))));
}
