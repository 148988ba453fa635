//! Methods, overloading and recursion.

use plc_tests::prelude::*;

mod calls {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("calls")
            .program("methods.plc")
            .step("square", |a| a.returns(144))
            .step("overload_by_arity", |a| a.prints(["none", "one 1", "two 3"]))
            .step("no_return_yields_nil", |a| a.prints(["side effect", "NIL"]))
    }

    #[test]
    fn test_method_calls() {
        scenario().run().unwrap();
    }
}

mod recursion {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("recursion")
            .program("methods.plc")
            .step("factorial", |a| a.returns(2432902008176640000i64))
            .step("fibonacci", |a| a.returns(2880067194370816120i64))
    }

    #[test]
    fn test_recursion_and_iteration_beyond_32_bits() {
        scenario().run().unwrap();
    }
}

mod scoping {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("scoping")
            .program("methods.plc")
            .step("defining_scope", |a| a.returns(12))
            .step("shared_fields", |a| a.returns(3))
            .step("parameters_shadow_fields", |a| a.returns(142))
    }

    #[test]
    fn test_methods_see_their_defining_scope() {
        scenario().run().unwrap();
    }
}
