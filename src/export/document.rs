//! The statement document handed to renderers.
//!
//! A [`StatementDocument`] is a read-only view of a [`SalaryCalculation`]
//! with every label and amount already formatted, so a renderer only lays
//! out text.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::extra_hours;
use crate::config::EngineRules;
use crate::error::EngineResult;
use crate::models::SalaryCalculation;

use super::{ExportFormat, format_krw, group_thousands, statement_file_name, statement_title};

/// Printed beside each table heading.
pub const UNIT_LABEL: &str = "(단위: 원)";

/// Printed at the foot of every statement.
pub const FOOTER_NOTE: &str = "본 명세서는 자동 계산 프로그램으로 생성되었습니다.";

/// The earnings table (급여 지급 내역).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsSection {
    /// Column headings. `상여금` appears only when a bonus was paid.
    pub headers: Vec<String>,
    /// The work period, e.g. `2025.01.01 ~ 2025.01.31`.
    pub work_period: String,
    /// Days worked, e.g. `20일`.
    pub work_days: String,
    /// Hours worked, e.g. `80시간`.
    pub work_hours: String,
    /// The hours above or below the daily schedule, e.g. `(기타가감: +4시간)`.
    pub extra_hours_note: Option<String>,
    /// The hourly wage.
    pub hourly_wage: String,
    /// The base salary.
    pub base_salary: String,
    /// The weekly-rest allowance.
    pub weekly_holiday_allowance: String,
    /// The bonus, when one was paid.
    pub bonus: Option<String>,
    /// Gross pay.
    pub total_salary: String,
}

/// The deductions table (공제 내역).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionsSection {
    /// Column headings.
    pub headers: Vec<String>,
    /// The combined withholding rate, e.g. `3.30%`.
    pub withholding_rate: String,
    /// Income tax.
    pub income_tax: String,
    /// Rural tax.
    pub rural_tax: String,
    /// Total deduction.
    pub total_deduction: String,
    /// Net pay.
    pub net_payment: String,
}

/// Headline amounts in won notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Gross pay, e.g. `₩ 968,000`.
    pub total_salary: String,
    /// Total deduction.
    pub total_deduction: String,
    /// Net pay.
    pub net_payment: String,
}

/// A fully formatted wage statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementDocument {
    /// The title, labelled with the pay-out month.
    pub title: String,
    /// The employee's name.
    pub employee_name: String,
    /// The unit label printed beside both tables.
    pub unit_label: String,
    /// The earnings table.
    pub earnings: EarningsSection,
    /// The deductions table.
    pub deductions: DeductionsSection,
    /// Headline amounts.
    pub summary: StatementSummary,
    /// Free-text remarks.
    pub remarks: String,
    /// The footer note.
    pub footer: String,
}

impl StatementDocument {
    /// Builds the document for a calculation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidInput`] if the record's
    /// year or month does not form a valid period.
    pub fn from_calculation(calc: &SalaryCalculation, rules: &EngineRules) -> EngineResult<Self> {
        let period = calc.period()?;
        let title = statement_title(&period)?;

        let extra = extra_hours(calc.work_hours, calc.work_days, &rules.work_hours).normalize();
        let extra_hours_note = if extra.is_zero() {
            None
        } else if extra > Decimal::ZERO {
            Some(format!("(기타가감: +{}시간)", extra))
        } else {
            Some(format!("(기타가감: {}시간)", extra))
        };

        let bonus = (calc.bonus > Decimal::ZERO).then(|| group_thousands(calc.bonus));

        let mut earnings_headers = vec![
            "근무일자",
            "근무일수",
            "근무시간",
            "시급",
            "급여액수",
            "주휴수당",
        ];
        if bonus.is_some() {
            earnings_headers.push("상여금");
        }
        earnings_headers.push("합계");

        let mut rate = rules.withholding.combined_rate() * Decimal::ONE_HUNDRED;
        rate.rescale(2);

        Ok(Self {
            title,
            employee_name: calc.employee_name.clone(),
            unit_label: UNIT_LABEL.to_string(),
            earnings: EarningsSection {
                headers: earnings_headers.into_iter().map(String::from).collect(),
                work_period: calc.work_period.clone(),
                work_days: format!("{}일", calc.work_days.normalize()),
                work_hours: format!("{}시간", calc.work_hours.normalize()),
                extra_hours_note,
                hourly_wage: group_thousands(calc.hourly_wage),
                base_salary: group_thousands(calc.base_salary),
                weekly_holiday_allowance: group_thousands(calc.weekly_holiday_allowance),
                bonus,
                total_salary: group_thousands(calc.total_salary),
            },
            deductions: DeductionsSection {
                headers: ["원천징수율", "소득세", "농어촌세", "징수 금액", "실 지급 금액"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                withholding_rate: format!("{}%", rate),
                income_tax: group_thousands(calc.income_tax),
                rural_tax: group_thousands(calc.rural_tax),
                total_deduction: group_thousands(calc.total_deduction),
                net_payment: group_thousands(calc.net_payment),
            },
            summary: StatementSummary {
                total_salary: format_krw(calc.total_salary),
                total_deduction: format_krw(calc.total_deduction),
                net_payment: format_krw(calc.net_payment),
            },
            remarks: calc.remarks.clone(),
            footer: FOOTER_NOTE.to_string(),
        })
    }
}

/// What a share sheet needs to send a statement image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    /// e.g. `홍길동 급여명세서`.
    pub title: String,
    /// e.g. `2025년 02월 급여명세서입니다.`
    pub text: String,
    /// The png file name.
    pub file_name: String,
}

impl SharePayload {
    /// Builds the share payload for a calculation.
    pub fn for_calculation(calc: &SalaryCalculation) -> EngineResult<Self> {
        let title = statement_title(&calc.period()?)?;
        Ok(Self {
            title: format!("{} 급여명세서", calc.employee_name),
            text: format!("{}입니다.", title),
            file_name: statement_file_name(calc, ExportFormat::Png)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_salary;
    use crate::models::SalaryInput;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_calculation(work_hours: &str, bonus: &str) -> SalaryCalculation {
        let input = SalaryInput {
            year: 2025,
            month: 1,
            employee_name: "홍길동".to_string(),
            work_days: dec("20"),
            work_hours: Some(dec(work_hours)),
            hourly_wage: dec("11000"),
            weekly_holiday_allowance: None,
            bonus: dec(bonus),
            remarks: "1월분".to_string(),
        };
        calculate_salary(&input, &EngineRules::default()).unwrap()
    }

    #[test]
    fn test_document_without_bonus() {
        let calc = create_test_calculation("80", "0");
        let doc = StatementDocument::from_calculation(&calc, &EngineRules::default()).unwrap();

        assert_eq!(doc.title, "2025년 02월 급여명세서");
        assert_eq!(doc.employee_name, "홍길동");
        assert_eq!(doc.unit_label, "(단위: 원)");
        assert_eq!(doc.earnings.work_period, "2025.01.01 ~ 2025.01.31");
        assert_eq!(doc.earnings.work_days, "20일");
        assert_eq!(doc.earnings.work_hours, "80시간");
        assert_eq!(doc.earnings.extra_hours_note, None);
        assert_eq!(doc.earnings.hourly_wage, "11,000");
        assert_eq!(doc.earnings.base_salary, "880,000");
        assert_eq!(doc.earnings.weekly_holiday_allowance, "88,000");
        assert_eq!(doc.earnings.bonus, None);
        assert!(!doc.earnings.headers.contains(&"상여금".to_string()));
        assert_eq!(doc.earnings.headers.len(), 7);
        assert_eq!(doc.earnings.total_salary, "968,000");
        assert_eq!(doc.deductions.withholding_rate, "3.30%");
        assert_eq!(doc.deductions.income_tax, "29,040");
        assert_eq!(doc.deductions.rural_tax, "2,900");
        assert_eq!(doc.deductions.total_deduction, "31,940");
        assert_eq!(doc.deductions.net_payment, "936,060");
        assert_eq!(doc.summary.net_payment, "₩ 936,060");
        assert_eq!(doc.remarks, "1월분");
    }

    #[test]
    fn test_bonus_column_appears_when_paid() {
        let calc = create_test_calculation("80", "500000");
        let doc = StatementDocument::from_calculation(&calc, &EngineRules::default()).unwrap();

        assert_eq!(doc.earnings.bonus.as_deref(), Some("500,000"));
        assert_eq!(doc.earnings.headers.len(), 8);
        assert_eq!(doc.earnings.headers[6], "상여금");
        assert_eq!(doc.summary.total_salary, "₩ 1,468,000");
    }

    #[test]
    fn test_extra_hours_note() {
        let calc = create_test_calculation("84", "0");
        let doc = StatementDocument::from_calculation(&calc, &EngineRules::default()).unwrap();
        assert_eq!(doc.earnings.extra_hours_note.as_deref(), Some("(기타가감: +4시간)"));

        let calc = create_test_calculation("77.5", "0");
        let doc = StatementDocument::from_calculation(&calc, &EngineRules::default()).unwrap();
        assert_eq!(
            doc.earnings.extra_hours_note.as_deref(),
            Some("(기타가감: -2.5시간)")
        );
    }

    #[test]
    fn test_share_payload() {
        let calc = create_test_calculation("80", "0");
        let share = SharePayload::for_calculation(&calc).unwrap();
        assert_eq!(share.title, "홍길동 급여명세서");
        assert_eq!(share.text, "2025년 02월 급여명세서입니다.");
        assert_eq!(share.file_name, "홍길동_2025년02월_급여명세서.png");
    }

    #[test]
    fn test_document_is_deterministic() {
        let calc = create_test_calculation("80", "0");
        let rules = EngineRules::default();
        assert_eq!(
            StatementDocument::from_calculation(&calc, &rules).unwrap(),
            StatementDocument::from_calculation(&calc, &rules).unwrap()
        );
    }
}
