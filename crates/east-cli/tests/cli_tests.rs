//! Exercises the scenario fixtures the `east` binary runs, the same way
//! `east-analyzer`'s `scenarios.rs` exercises the analyzer directly — this
//! suite checks the CLI's own scenario table stays consistent with spec §8,
//! not the analyzer's internals (already covered there).

use east::analyzer::{AnalyzeError, BuiltinTable};
use east_cli::scenarios;

fn compile(scenario: &scenarios::Scenario, builtins: &BuiltinTable) -> Result<(), AnalyzeError> {
    east::compile(&scenario.ast, &scenario.platform, builtins).map(|_| ())
}

#[test]
fn all_six_scenarios_are_present_in_spec_order() {
    let names: Vec<&str> = scenarios::all().iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["E1", "E2", "E3", "E4", "E5", "E6"]);
}

#[test]
fn e1_e2_e3_e4_compile_cleanly() {
    let builtins = scenarios::builtins();
    for scenario in scenarios::all() {
        if matches!(scenario.name, "E5" | "E6") {
            continue;
        }
        assert!(compile(&scenario, &builtins).is_ok(), "{} should compile", scenario.name);
    }
}

#[test]
fn e5_is_a_shape_error() {
    let builtins = scenarios::builtins();
    let scenario = scenarios::all().into_iter().find(|s| s.name == "E5").unwrap();
    let err = compile(&scenario, &builtins).unwrap_err();
    assert_eq!(err.kind, east::analyzer::ErrorKind::ShapeError);
}

#[test]
fn e6_is_a_subtype_error() {
    let builtins = scenarios::builtins();
    let scenario = scenarios::all().into_iter().find(|s| s.name == "E6").unwrap();
    let err = compile(&scenario, &builtins).unwrap_err();
    assert_eq!(err.kind, east::analyzer::ErrorKind::SubtypeError);
}

#[test]
fn e3_is_async_end_to_end() {
    let builtins = scenarios::builtins();
    let scenario = scenarios::all().into_iter().find(|s| s.name == "E3").unwrap();
    let ir = east::compile(&scenario.ast, &scenario.platform, &builtins).expect("should compile");
    assert!(ir.is_async());
}
