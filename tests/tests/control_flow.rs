//! Branches and loops.

use plc_tests::prelude::*;

mod branches {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("branches")
            .program("control_flow.plc")
            .step("if_true", |a| a.returns(1))
            .step("if_else", |a| a.returns(10))
    }

    #[test]
    fn test_if_takes_one_branch() {
        scenario().run().unwrap();
    }
}

mod loops {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("loops")
            .program("control_flow.plc")
            .step("for_sum", |a| a.returns(10))
            .step("empty_range", |a| a.returns(0))
            .step("while_count", |a| a.returns(10))
            .step("empty_while", |a| a.returns(0))
            .step("nested_loops", |a| a.returns(36))
            .step("loop_locals_are_fresh", |a| a.prints(["0", "1", "4"]))
            .step("return_from_loop", |a| a.returns(8))
    }

    #[test]
    fn test_for_and_while_loops() {
        scenario().run().unwrap();
    }
}

mod declarations {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("declarations")
            .program("control_flow.plc")
            .step("redeclaration_shadows", |a| a.returns(20))
    }

    #[test]
    fn test_later_declarations_replace_earlier_ones() {
        scenario().run().unwrap();
    }
}
