// tests/property_dispatch.rs

use std::time::Duration;

use proptest::prelude::*;

use batch::engine::Dispatcher;
use batch_test_utils::builders::RunConfigBuilder;
use batch_test_utils::fake_runner::FakeRunner;
use batch_test_utils::source_from;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// For any parallelism and job list: every job runs exactly once, is
    /// numbered in input order, and no more than `n` run at once.
    #[test]
    fn bounded_and_exactly_once(
        n in 1usize..6,
        lines in proptest::collection::vec("[a-z ]{0,12}", 0..24),
        delay_ms in 0u64..4,
    ) {
        let input: String = lines.iter().map(|l| format!("{l}\n")).collect();

        let runner = FakeRunner::new(Duration::from_millis(delay_ms));
        let probe = runner.probe();
        let dispatcher = Dispatcher::new(RunConfigBuilder::new().parallelism(n).build(), runner);

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_time()
            .build()
            .unwrap();
        let report = rt.block_on(dispatcher.run(source_from(&input))).unwrap();

        prop_assert_eq!(report.launched, lines.len());
        prop_assert_eq!(report.succeeded, lines.len());
        prop_assert!(probe.peak() <= n);
        prop_assert_eq!(probe.seqs(), (0..lines.len()).collect::<Vec<_>>());

        for (seq, text) in probe.executed() {
            prop_assert_eq!(&text, &lines[seq]);
        }
    }
}
