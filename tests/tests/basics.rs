//! Literals, fields and operators, checked and run end to end.

use plc_tests::prelude::*;

mod output {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("output")
            .program("basics.plc")
            .step("hello", |a| a.returns(0).prints(["Hello, World!"]))
            .step("add", |a| a.returns(2).silent())
            .step("uninitialized_field", |a| a.prints(["NIL"]))
            .step("literals", |a| {
                a.prints(["NIL", "true", "1", "1.0", "c", "string"])
            })
    }

    #[test]
    fn test_printing_and_returning() {
        scenario().run().unwrap();
    }
}

mod fields {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("fields")
            .program("basics.plc")
            .step("fields", |a| a.returns(11))
    }

    #[test]
    fn test_fields_are_visible_in_main() {
        scenario().run().unwrap();
    }
}

mod operators {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("operators")
            .program("basics.plc")
            .step("arithmetic", |a| {
                a.returns(5).prints(["11", "14", "3", "0.4", "ab", "a1"])
            })
            .step("comparisons", |a| {
                a.prints(["true", "false", "false", "true", "true", "false", "true"])
            })
            .step("big_integers", |a| a.prints(["4611686014132420609"]))
            .step("decimal_rounding", |a| a.prints(["0.2", "0.4", "2.50"]))
            .step("negative_literals", |a| a.returns(2))
    }

    #[test]
    fn test_binary_operators() {
        scenario().run().unwrap();
    }
}
