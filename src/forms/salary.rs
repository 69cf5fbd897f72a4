//! Salary forms for the two tax regimes.

use serde::{Deserialize, Serialize};

use super::{amount_text, optional, optional_or_zero, required};
use crate::error::{EngineError, EngineResult};
use crate::models::{Deductions, NewRegimeInput, OldRegimeInput, PfContribution};

/// Builds the PF contribution from the two PF fields.
///
/// Employee and employer PF normally match, so a value typed into only one
/// field is used for both.
fn pf_contribution(
    employee: &Option<String>,
    employer: &Option<String>,
    part_of_salary: bool,
) -> EngineResult<PfContribution> {
    let (employee, employer) = match (
        optional("employee_pf", employee)?,
        optional("employer_pf", employer)?,
    ) {
        (Some(employee), Some(employer)) => (employee, employer),
        (Some(amount), None) | (None, Some(amount)) => (amount, amount),
        (None, None) => {
            return Err(EngineError::MissingField {
                field: "employee_pf".to_string(),
            });
        }
    };

    Ok(PfContribution {
        employee,
        employer,
        part_of_salary,
    })
}

/// The new regime salary form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegimeForm {
    /// Gross annual salary.
    #[serde(default, deserialize_with = "amount_text")]
    pub annual_salary: Option<String>,
    /// Employee PF contribution per year.
    #[serde(default, deserialize_with = "amount_text")]
    pub employee_pf: Option<String>,
    /// Employer PF contribution per year.
    #[serde(default, deserialize_with = "amount_text")]
    pub employer_pf: Option<String>,
    /// Whether the employer PF is included in the quoted salary.
    #[serde(default)]
    pub is_pf_part_of_salary: bool,
}

impl TryFrom<NewRegimeForm> for NewRegimeInput {
    type Error = EngineError;

    fn try_from(form: NewRegimeForm) -> EngineResult<Self> {
        Ok(NewRegimeInput {
            annual_salary: required("annual_salary", &form.annual_salary)?,
            pf: pf_contribution(
                &form.employee_pf,
                &form.employer_pf,
                form.is_pf_part_of_salary,
            )?,
        })
    }
}

/// The old regime salary form.
///
/// Only the salary and PF are required; every deduction left empty counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldRegimeForm {
    /// Gross annual salary.
    #[serde(default, deserialize_with = "amount_text")]
    pub annual_salary: Option<String>,
    /// Exempt HRA.
    #[serde(default, deserialize_with = "amount_text")]
    pub hra: Option<String>,
    /// Section 80D health insurance.
    #[serde(default, deserialize_with = "amount_text")]
    pub section_80d: Option<String>,
    /// Section 24(b) home loan interest.
    #[serde(default, deserialize_with = "amount_text")]
    pub section_24: Option<String>,
    /// Section 80EE home loan interest.
    #[serde(default, deserialize_with = "amount_text")]
    pub section_80ee: Option<String>,
    /// Any other deductions.
    #[serde(default, deserialize_with = "amount_text")]
    pub other_deductions: Option<String>,
    /// Section 80C investments, excluding employee PF.
    #[serde(default, deserialize_with = "amount_text")]
    pub section_80c: Option<String>,
    /// Employee PF contribution per year.
    #[serde(default, deserialize_with = "amount_text")]
    pub employee_pf: Option<String>,
    /// Employer PF contribution per year.
    #[serde(default, deserialize_with = "amount_text")]
    pub employer_pf: Option<String>,
    /// Whether the employer PF is included in the quoted salary.
    #[serde(default)]
    pub is_pf_part_of_salary: bool,
}

impl TryFrom<OldRegimeForm> for OldRegimeInput {
    type Error = EngineError;

    fn try_from(form: OldRegimeForm) -> EngineResult<Self> {
        Ok(OldRegimeInput {
            annual_salary: required("annual_salary", &form.annual_salary)?,
            deductions: Deductions {
                hra: optional_or_zero("hra", &form.hra)?,
                section_80d: optional_or_zero("section_80d", &form.section_80d)?,
                section_24: optional_or_zero("section_24", &form.section_24)?,
                section_80ee: optional_or_zero("section_80ee", &form.section_80ee)?,
                other: optional_or_zero("other_deductions", &form.other_deductions)?,
                section_80c: optional_or_zero("section_80c", &form.section_80c)?,
            },
            pf: pf_contribution(
                &form.employee_pf,
                &form.employer_pf,
                form.is_pf_part_of_salary,
            )?,
        })
    }
}
