use indicator_tabulate::{
    display_width, fixed, tabulate, SamplePeriod, TabulateConfig, TIME_FIELD,
};
use proptest::prelude::*;

fn line(fields: &[(String, String)]) -> String {
    let body: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!("\"{key}\": \"{value}\""))
        .collect();
    format!("(b'{{{}}}', ('127.0.0.1', 10000))", body.join(", "))
}

fn field() -> impl Strategy<Value = (String, String)> {
    ("[a-z_]{1,12}", "[A-Za-z0-9 .-]{0,20}")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn columns_fit_header_and_every_value(
        rows in prop::collection::vec(prop::collection::vec(field(), 0..6), 1..12)
    ) {
        let input: String = rows.iter().map(|fields| line(fields) + "\n").collect();
        let period = SamplePeriod::from_millis(100).unwrap();
        let config = TabulateConfig {
            default_fields: vec![],
            ..TabulateConfig::default()
        };
        let (table, _) = tabulate(input.as_bytes(), &config, period).unwrap();

        for column in table.registry().columns() {
            prop_assert!(column.width >= display_width(&column.name));
            for row in table.rows() {
                if let Some(value) = row.get(&column.name) {
                    prop_assert!(column.width >= display_width(value));
                }
            }
        }
    }

    #[test]
    fn time_is_index_times_period(millis in 1u64..5000, count in 1usize..20) {
        let input = "(b'{}', ('h', 1))\n".repeat(count);
        let period = SamplePeriod::from_millis(millis).unwrap();
        let (table, report) = tabulate(input.as_bytes(), &TabulateConfig::default(), period).unwrap();

        prop_assert_eq!(report.entries, count);
        for (index, row) in table.rows().iter().enumerate() {
            let expected = fixed(index as f64 * period.as_secs_f64());
            prop_assert_eq!(row.get(TIME_FIELD), Some(expected.as_str()));
        }
    }
}
