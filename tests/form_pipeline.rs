//! End-to-end checks from form text through the engines to rendered output.

use approx::assert_abs_diff_eq;
use real_estate_calculator::{
    batch::{load_loans_from_reader, BatchRunner},
    form::{self, FormError},
    render, AmortizationEngine, CalcError, NpvEngine, OutputFormat, RenderConfig,
};

#[test]
fn amortization_form_to_csv() {
    let loan = form::parse_loan_form("1200", "12", "0.12").unwrap();
    let schedule = AmortizationEngine::new().schedule(&loan).unwrap();

    let config = RenderConfig {
        format: OutputFormat::Csv,
        ..RenderConfig::default()
    };
    let mut buf = Vec::new();
    render::write_schedule(&mut buf, &schedule, &config).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 12);

    // Each row's ending balance is the next row's beginning balance
    for pair in rows.windows(2) {
        assert_eq!(&pair[0][5], &pair[1][1]);
    }
    assert_eq!(&rows[11][5], "0.00");
}

#[test]
fn mortgage_schedule_retires_balance() {
    let loan = form::parse_loan_form("350000", "360", "0.0675").unwrap();
    let schedule = AmortizationEngine::new().schedule(&loan).unwrap();
    let summary = schedule.summary();

    assert_eq!(summary.total_months, 360);
    // Standard 30-year payment at 6.75%
    assert_abs_diff_eq!(summary.monthly_payment, 2270.09, epsilon = 0.01);
    assert_abs_diff_eq!(summary.final_balance, 0.0, epsilon = 350000.0 * 1e-6);
    assert_abs_diff_eq!(summary.total_principal, 350000.0, epsilon = 1e-3);
}

#[test]
fn npv_form_to_label() {
    let input = form::parse_npv_form("0.1", "-1000, 1100").unwrap();
    let result = NpvEngine::new().evaluate(&input).unwrap();
    assert_abs_diff_eq!(result.npv, 0.0, epsilon = 1e-9);

    let input = form::parse_npv_form("0", "100, 100, 100").unwrap();
    assert_eq!(form::npv_label(&input).unwrap(), "NPV: 300.00");
}

#[test]
fn rejected_inputs_surface_as_typed_errors() {
    let loan = form::parse_loan_form("1000", "5", "0").unwrap();
    let err = form::amortization_table(&loan).unwrap_err();
    assert!(matches!(err, FormError::Calc(CalcError::DegenerateInput { .. })));

    let loan = form::parse_loan_form("-1", "12", "0.05").unwrap();
    let err = form::amortization_table(&loan).unwrap_err();
    assert!(matches!(err, FormError::Calc(CalcError::InvalidInput { field: "principal", .. })));

    let err = form::parse_npv_form("five percent", "100").unwrap_err();
    assert!(matches!(err, FormError::Parse { field: "discount_rate", .. }));
}

#[test]
fn batch_from_csv_text() {
    let data = "LoanID,Principal,TermMonths,AnnualRate\n\
                home,350000,360,0.0675\n\
                promo,12000,24,0\n\
                car,24000,60,0.049\n";
    let loans = load_loans_from_reader(data.as_bytes()).unwrap();
    let outcomes = BatchRunner::new().run(&loans);

    let ids: Vec<&str> = outcomes.iter().map(|o| o.loan_id.as_str()).collect();
    assert_eq!(ids, ["home", "promo", "car"]);
    assert!(outcomes[0].result.is_ok());
    assert!(matches!(outcomes[1].result, Err(CalcError::DegenerateInput { .. })));
    assert_eq!(outcomes[2].result.as_ref().unwrap().total_months, 60);
}
