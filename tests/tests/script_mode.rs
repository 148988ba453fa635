//! Programs run without analysis.
//!
//! Some of these are ill-typed and only fail when the offending code runs.

use plc_tests::prelude::*;

mod unchecked {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("unchecked")
            .program("script.plc")
            .mode(Mode::Script)
            .step("fields_without_return", |a| a.returns(Value::Nil))
            .step("main_without_return_type", |a| a.returns(0))
            .step("grouped_literal", |a| a.returns(1))
            .step("branch_never_taken", |a| a.returns(0))
            .step("nil_concatenation", |a| a.returns("xNIL"))
            .step("equality_across_kinds", |a| a.returns(false))
    }

    #[test]
    fn test_programs_the_analyzer_would_reject_still_run() {
        scenario().run().unwrap();
    }
}

mod short_circuit {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("short_circuit")
            .program("script.plc")
            .mode(Mode::Script)
            .step("short_circuit_or", |a| a.returns(true))
            .step("short_circuit_and", |a| a.returns(false))
    }

    #[test]
    fn test_right_operand_is_skipped() {
        scenario().run().unwrap();
    }
}

mod late_binding {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("late_binding")
            .program("script.plc")
            .mode(Mode::Script)
            .step("mutual_recursion", |a| a.returns(true))
    }

    #[test]
    fn test_calls_resolve_when_they_run() {
        scenario().run().unwrap();
    }
}

mod runtime_errors {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("runtime_errors")
            .program("script.plc")
            .mode(Mode::Script)
            .step("division_by_zero", |a| a.error("runtime error: Division by zero"))
            .step("decimal_division_by_zero", |a| a.error("Division by zero"))
            .step("loop_variable_does_not_leak", |a| {
                a.error("Undefined variable 'i'")
            })
            .step("arity_mismatch", |a| {
                a.error("Function 'f' expects 1 arguments, got 0")
            })
            .step("undefined_function", |a| a.error("Undefined function 'missing/0'"))
            .step("condition_not_boolean", |a| {
                a.error("Type mismatch: expected Boolean, got Integer")
            })
            .step("mixed_numeric", |a| {
                a.error("Invalid operator '+' for values Integer and Decimal")
            })
            .step("boolean_comparison", |a| {
                a.error("Invalid operator '<' for values Boolean and Boolean")
            })
            .step("iterate_integer", |a| {
                a.error("Type mismatch: expected IntegerIterable, got Integer")
            })
            .step("missing_main", |a| a.error("Undefined function 'main/0'"))
    }

    #[test]
    fn test_dynamic_checks() {
        scenario().run().unwrap();
    }
}
