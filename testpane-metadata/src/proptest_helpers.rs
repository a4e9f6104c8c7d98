// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{TestOutcome, TestReport, TestResult};
use proptest::{collection::vec, option, prelude::*};

impl Arbitrary for TestOutcome {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            3 => Just(TestOutcome::Passed),
            3 => Just(TestOutcome::Failed),
            2 => Just(TestOutcome::Skipped),
            1 => "[a-z]{1,8}".prop_map(TestOutcome::from),
        ]
        .boxed()
    }
}

impl Arbitrary for TestResult {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            "[a-z_]{1,12}(\\[[0-9.-]{1,6}\\])?",
            any::<TestOutcome>(),
            option::of("[ -~\n]{0,80}"),
        )
            .prop_map(|(name, outcome, detail)| {
                let result = TestResult::new(name, outcome);
                match detail {
                    Some(detail) => result.with_detail(detail),
                    None => result,
                }
            })
            .boxed()
    }
}

/// Generates reports whose summary matches the listed tests.
impl Arbitrary for TestReport {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        vec(any::<TestResult>(), 0..16)
            .prop_map(TestReport::from_tests)
            .boxed()
    }
}
