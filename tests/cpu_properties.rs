use proptest::prelude::*;
use rootwatch::system::cpu::{CpuCounters, calculate_cpu_usage};
use rootwatch::system::parse::{MIN_PROCESS_COLUMNS, parse_cpu_counters, parse_process_table};

proptest! {
    #[test]
    fn usage_is_always_a_percentage(
        first in prop::collection::vec(any::<u64>(), 0..12),
        second in prop::collection::vec(any::<u64>(), 0..12),
    ) {
        let usage = calculate_cpu_usage(&CpuCounters(first), &CpuCounters(second));
        prop_assert!((0.0..=100.0).contains(&usage), "out of range: {}", usage);
    }

    #[test]
    fn short_reads_yield_zero(
        first in prop::collection::vec(0u64..1_000_000, 0..4),
        second in prop::collection::vec(0u64..1_000_000, 0..12),
    ) {
        prop_assert_eq!(calculate_cpu_usage(&CpuCounters(first.clone()), &CpuCounters(second.clone())), 0.0);
        prop_assert_eq!(calculate_cpu_usage(&CpuCounters(second), &CpuCounters(first)), 0.0);
    }

    #[test]
    fn identical_reads_yield_zero(
        counters in prop::collection::vec(0u64..1_000_000_000, 4..12),
    ) {
        let c = CpuCounters(counters);
        prop_assert_eq!(calculate_cpu_usage(&c, &c), 0.0);
    }

    #[test]
    fn cpu_line_round_trips_numbers(values in prop::collection::vec(any::<u64>(), 0..12)) {
        let line = std::iter::once("cpu".to_string())
            .chain(values.iter().map(u64::to_string))
            .collect::<Vec<_>>()
            .join(" ");
        prop_assert_eq!(parse_cpu_counters(&line), CpuCounters(values));
    }

    #[test]
    fn process_rows_meet_column_minimum(text in "[a-z0-9 \n]{0,400}") {
        let data_lines: Vec<&str> = text.lines().skip(1).collect();
        let rows = parse_process_table(&text);
        let expected = data_lines
            .iter()
            .filter(|l| l.split_whitespace().count() >= MIN_PROCESS_COLUMNS)
            .count();
        prop_assert_eq!(rows.len(), expected);
        for row in &rows {
            prop_assert!(!row.name.contains(' '));
        }
    }
}
